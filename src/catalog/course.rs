// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::feed::{Author, Entry};

use super::episode::Episode;

/// A lecture course and its episodes, keyed by episode key in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Course {
    pub id: String,
    pub author: Author,
    pub title: String,
    pub episodes: IndexMap<String, Episode>,
    /// URL of the course's sub-feed
    pub feed: String,
    pub updated: String,
}

impl Course {
    /// Create a course from a root feed entry with an empty episode map
    pub fn from_entry(entry: &Entry, feed_url: &str) -> Self {
        let mut course = Self::default();
        course.refresh_metadata(entry, feed_url);
        course
    }

    /// Replace all course metadata, leaving the episodes untouched
    pub fn refresh_metadata(&mut self, entry: &Entry, feed_url: &str) {
        self.id = entry.id.clone();
        self.author = entry.author.clone();
        self.title = entry.title.clone();
        self.feed = feed_url.to_string();
        self.updated = entry.updated.clone();
    }

    /// Merge one sub-feed entry into the episode stored under `key`
    ///
    /// The episode is created from `entry` if the key is new. The whole
    /// update happens in this call, so no partially merged episode is ever
    /// observable by later entries.
    pub fn merge_episode(
        &mut self,
        key: String,
        entry: &Entry,
        chapters: Option<String>,
        files: Vec<String>,
    ) -> &Episode {
        let episode = self
            .episodes
            .entry(key)
            .or_insert_with(|| Episode::from_entry(entry));
        episode.merge(chapters, files);
        episode
    }

    pub fn episode(&self, key: &str) -> Option<&Episode> {
        self.episodes.get(key)
    }
}
