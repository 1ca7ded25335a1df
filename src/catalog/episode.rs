// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::feed::Entry;

/// A single lecture recording within a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub summary: String,
    /// Enclosure URLs in the order they were seen
    pub files: Vec<String>,
    /// SRT formatted chapter markers, empty if none were found
    pub chapters: String,
}

impl Episode {
    /// Create an episode from a sub-feed entry, without chapters or files
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            updated: entry.updated.clone(),
            summary: entry.summary.clone(),
            files: Vec::new(),
            chapters: String::new(),
        }
    }

    /// Fold newly fetched data into the episode
    ///
    /// Chapter text is only replaced when new chapters are present, files accumulate.
    pub fn merge(&mut self, chapters: Option<String>, files: Vec<String>) {
        if let Some(chapters) = chapters {
            self.chapters = chapters;
        }
        self.files.extend(files);
    }

    pub fn has_chapters(&self) -> bool {
        !self.chapters.is_empty()
    }
}
