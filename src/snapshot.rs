// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::catalog::{Course, CourseStore};
use crate::error::SnapshotError;

/// File name of the snapshot written into the working directory
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "courses.json";

/// Suffix of the temporary file the snapshot is written to before the rename
const PARTIAL_SUFFIX: &str = ".partial";

fn partial_path(path: &Path) -> PathBuf {
    let mut partial = path.as_os_str().to_owned();
    partial.push(PARTIAL_SUFFIX);
    PathBuf::from(partial)
}

/// Write the course map as JSON to `path`
///
/// The JSON is written to `<path>.partial` first and then renamed over
/// `path`, so an interrupted run leaves any previous snapshot intact.
pub fn write_snapshot(store: &CourseStore, path: &Path) -> Result<(), SnapshotError> {
    let json = serde_json::to_string_pretty(store).map_err(SnapshotError::SerializeFailed)?;
    let partial = partial_path(path);

    std::fs::write(&partial, json).map_err(|e| SnapshotError::WriteFailed {
        path: partial.clone(),
        source: e,
    })?;

    std::fs::rename(&partial, path).map_err(|e| {
        let _ = std::fs::remove_file(&partial);
        SnapshotError::RenameFailed {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Read a previously written snapshot
pub fn read_snapshot(path: &Path) -> Result<IndexMap<String, Course>, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| SnapshotError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Author, Entry};
    use tempfile::tempdir;

    fn make_entry(id: &str) -> Entry {
        Entry {
            id: id.to_string(),
            updated: "2024-01-15T12:00:00Z".to_string(),
            title: format!("Title {id}"),
            author: Author {
                name: "Prof. Example".to_string(),
                email: "prof@example.com".to_string(),
            },
            links: vec![],
            summary: "Summary".to_string(),
        }
    }

    fn make_store() -> CourseStore {
        let mut store = CourseStore::new();
        store.upsert_course(&make_entry("c1"), "https://x/c1/feed").merge_episode(
            "0007".to_string(),
            &make_entry("e1"),
            Some("1\n00:00:00,000 --> 00:00:05,000\nIntro\n".to_string()),
            vec!["https://x/video.mp4".to_string()],
        );
        store.upsert_course(&make_entry("c2"), "https://x/c2/feed");
        store
    }

    #[test]
    fn write_and_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILENAME);
        let store = make_store();

        write_snapshot(&store, &path).unwrap();
        let read_back = read_snapshot(&path).unwrap();

        assert_eq!(CourseStore::from(read_back), store);
        assert!(!partial_path(&path).exists());
    }

    #[test]
    fn snapshot_uses_documented_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILENAME);

        write_snapshot(&make_store(), &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let episode = &json["c1"]["Episodes"]["0007"];

        assert_eq!(json["c1"]["Author"]["Email"], "prof@example.com");
        assert_eq!(json["c1"]["Feed"], "https://x/c1/feed");
        assert_eq!(json["c1"]["Updated"], "2024-01-15T12:00:00Z");
        assert_eq!(episode["Id"], "e1");
        assert_eq!(episode["Files"][0], "https://x/video.mp4");
        assert!(episode["Chapters"].as_str().unwrap().starts_with("1\n"));
    }

    #[test]
    fn write_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILENAME);

        write_snapshot(&make_store(), &path).unwrap();
        write_snapshot(&CourseStore::new(), &path).unwrap();

        assert!(read_snapshot(&path).unwrap().is_empty());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_SNAPSHOT_FILENAME);

        let result = write_snapshot(&make_store(), &path);
        assert!(matches!(result, Err(SnapshotError::WriteFailed { .. })));
    }

    #[test]
    fn read_nonexistent_returns_error() {
        let dir = tempdir().unwrap();
        let result = read_snapshot(&dir.path().join("nonexistent.json"));
        assert!(matches!(result, Err(SnapshotError::ReadFailed { .. })));
    }

    #[test]
    fn read_invalid_json_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SNAPSHOT_FILENAME);
        std::fs::write(&path, "not json").unwrap();

        let result = read_snapshot(&path);
        assert!(matches!(result, Err(SnapshotError::ParseFailed { .. })));
    }
}
