// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::LinkError;
use crate::feed::Link;

/// Relation tag marking an attached media file
pub const ENCLOSURE_REL: &str = "enclosure";

/// Suffix identifying the per-course sub-feed link
pub const FEED_LINK_SUFFIX: &str = "/feed";

static EPISODE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}$").expect("episode key pattern is valid"));

/// A link pointing at a subtitle track, together with the episode key taken from its URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleLink {
    /// Last four digits of the URL
    pub key: String,
    pub url: String,
}

/// Return the first link whose URL ends in `/feed`
pub fn resolve_feed_link(links: &[Link]) -> Result<&str, LinkError> {
    links
        .iter()
        .find(|link| link.href.ends_with(FEED_LINK_SUFFIX))
        .map(|link| link.href.as_str())
        .ok_or(LinkError::FeedLinkNotFound)
}

/// Extract the trailing four-digit episode key from a URL
pub fn extract_episode_key(href: &str) -> Option<&str> {
    EPISODE_KEY.find(href).map(|m| m.as_str())
}

/// Return the first link whose URL ends in four digits
pub fn resolve_subtitle_link(links: &[Link]) -> Result<SubtitleLink, LinkError> {
    links
        .iter()
        .find_map(|link| {
            extract_episode_key(&link.href).map(|key| SubtitleLink {
                key: key.to_string(),
                url: link.href.clone(),
            })
        })
        .ok_or(LinkError::SubtitleLinkNotFound)
}

/// Collect the URLs of all enclosure links, in feed order
pub fn enclosure_urls(links: &[Link]) -> Vec<String> {
    links
        .iter()
        .filter(|link| link.rel == ENCLOSURE_REL)
        .map(|link| link.href.clone())
        .collect()
}
