// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Represents a parsed Atom feed
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub entries: Vec<Entry>,
}

/// Represents a single Atom entry (a course in the root feed, an episode in a sub-feed)
#[derive(Debug, Clone, Default)]
pub struct Entry {
    pub id: String,
    /// RFC 3339 timestamp of the last update
    pub updated: String,
    pub title: String,
    pub author: Author,
    pub links: Vec<Link>,
    pub summary: String,
}

/// Author of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// A relation-tagged link of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }
}

/// Parse Atom feed XML bytes into a Feed struct
pub fn parse_feed(xml_bytes: &[u8]) -> Result<Feed, FeedError> {
    let feed = atom_syndication::Feed::read_from(xml_bytes)?;

    let entries = feed.entries().iter().map(parse_entry).collect();

    Ok(Feed { entries })
}

fn parse_entry(entry: &atom_syndication::Entry) -> Entry {
    let author = entry
        .authors()
        .first()
        .map(|person| Author {
            name: person.name().to_string(),
            email: person.email().unwrap_or_default().to_string(),
        })
        .unwrap_or_default();

    let links = entry
        .links()
        .iter()
        .map(|link| Link::new(link.rel(), link.href()))
        .collect();

    Entry {
        id: entry.id().to_string(),
        updated: format_timestamp(entry.updated()),
        title: entry.title().value.clone(),
        author,
        links,
        summary: entry
            .summary()
            .map(|text| text.value.clone())
            .unwrap_or_default(),
    }
}

/// Format an entry timestamp, leaving it empty when the feed had none
///
/// atom_syndication fills a missing `<updated>` with the Unix epoch.
fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    if timestamp.timestamp() == 0 && timestamp.timestamp_subsec_nanos() == 0 {
        return String::new();
    }

    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
