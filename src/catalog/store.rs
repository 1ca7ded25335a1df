// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::feed::Entry;
use crate::links::resolve_subtitle_link;

use super::course::Course;

/// In-memory map of all courses collected during one harvest run
///
/// Courses are keyed by the id of their root feed entry. The store only
/// grows: courses and episodes are inserted or updated in place, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseStore {
    courses: IndexMap<String, Course>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a course for `entry` or refresh the metadata of an existing one
    ///
    /// A recurring course id replaces id, author, title, feed and updated, but
    /// the episodes merged so far are kept.
    pub fn upsert_course(&mut self, entry: &Entry, feed_url: &str) -> &mut Course {
        self.courses
            .entry(entry.id.clone())
            .and_modify(|course| course.refresh_metadata(entry, feed_url))
            .or_insert_with(|| Course::from_entry(entry, feed_url))
    }

    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of episodes across all courses
    pub fn episode_count(&self) -> usize {
        self.courses.values().map(|course| course.episodes.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Course)> {
        self.courses.iter()
    }

    pub fn courses(&self) -> &IndexMap<String, Course> {
        &self.courses
    }

    pub fn into_courses(self) -> IndexMap<String, Course> {
        self.courses
    }
}

impl From<IndexMap<String, Course>> for CourseStore {
    fn from(courses: IndexMap<String, Course>) -> Self {
        Self { courses }
    }
}

/// Key an episode entry is stored under
///
/// This is the four-digit suffix of its subtitle link, or the entry id when
/// the entry has no subtitle link.
pub fn episode_key(entry: &Entry) -> String {
    resolve_subtitle_link(&entry.links)
        .map(|link| link.key)
        .unwrap_or_else(|_| entry.id.clone())
}
