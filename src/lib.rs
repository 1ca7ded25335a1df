pub mod catalog;
pub mod chapters;
pub mod error;
pub mod feed;
pub mod harvest;
pub mod http;
pub mod links;
pub mod progress;
pub mod snapshot;

// Re-export main types for convenience
pub use catalog::{Course, CourseStore, Episode, episode_key};
pub use chapters::{Cue, chapter_text, fetch_chapters, parse_webvtt, render_srt};
pub use error::{ChapterError, FeedError, HarvestError, LinkError, SnapshotError, WebVttError};
pub use feed::{Author, Entry, Feed, Link, fetch_feed, parse_feed};
pub use harvest::{
    DEFAULT_REQUEST_DELAY, DEFAULT_ROOT_FEED_URL, HarvestOptions, HarvestReport, harvest_courses,
    run,
};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use links::{SubtitleLink, enclosure_urls, resolve_feed_link, resolve_subtitle_link};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use snapshot::{DEFAULT_SNAPSHOT_FILENAME, read_snapshot, write_snapshot};
