use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted during a harvest run for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A feed is being fetched from URL
    FetchingFeed { url: String },

    /// A feed has been parsed successfully
    FeedParsed { url: String, entry_count: usize },

    /// Processing of a course is starting
    CourseStarted {
        course_title: String,
        /// Index of this course in the root feed
        course_index: usize,
        total_courses: usize,
    },

    /// A course was left out of the snapshot
    CourseSkipped {
        course_id: String,
        course_title: String,
        error: String,
    },

    /// An episode has been merged into its course
    EpisodeMerged {
        course_title: String,
        episode_key: String,
        episode_title: String,
        has_chapters: bool,
    },

    /// A subtitle track was found but could not be turned into chapters
    ChaptersUnavailable {
        episode_title: String,
        url: String,
        error: String,
    },

    /// The snapshot file has been written
    SnapshotWritten {
        path: PathBuf,
        course_count: usize,
        episode_count: usize,
    },

    /// Harvest completed and the snapshot was written
    HarvestCompleted {
        course_count: usize,
        episode_count: usize,
        skipped_count: usize,
    },
}

/// Trait for reporting progress events during a harvest.
///
/// Implementations can use this to display progress bars, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
