// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;
use std::time::Duration;

use crate::catalog::{CourseStore, episode_key};
use crate::chapters::{chapter_text, fetch_chapters};
use crate::error::HarvestError;
use crate::feed::{Entry, Feed, fetch_feed};
use crate::http::HttpClient;
use crate::links::{enclosure_urls, resolve_feed_link, resolve_subtitle_link};
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::snapshot::write_snapshot;

/// Root feed listing all courses
pub const DEFAULT_ROOT_FEED_URL: &str = "https://rwth.video/courses/feed";

/// Pause before every subtitle request
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(100);

/// Options for a harvest run
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Delay inserted before each subtitle fetch
    pub request_delay: Duration,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Result of a harvest run
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// All courses that were harvested successfully
    pub store: CourseStore,
    /// Courses left out of the snapshot (title, error message)
    pub skipped_courses: Vec<(String, String)>,
    /// Subtitle tracks that could not be read (episode title, error message)
    pub chapter_failures: Vec<(String, String)>,
}

/// Harvest the course hierarchy below `root_url` into a fresh course store
///
/// Courses are processed one after another:
/// 1. Fetch the root feed (failure aborts the run)
/// 2. For each course, resolve and fetch its sub-feed (failure skips the course)
/// 3. For each episode, fetch its subtitle track and merge it into the course
///
/// Missing or unreadable subtitle tracks leave the episode without new
/// chapters. Failing to render parsed cues aborts the run.
pub async fn harvest_courses<C: HttpClient>(
    client: &C,
    root_url: &str,
    options: &HarvestOptions,
    reporter: &SharedProgressReporter,
) -> Result<HarvestReport, HarvestError> {
    reporter.report(ProgressEvent::FetchingFeed {
        url: root_url.to_string(),
    });

    let root = fetch_feed(client, root_url).await?;

    reporter.report(ProgressEvent::FeedParsed {
        url: root_url.to_string(),
        entry_count: root.entries.len(),
    });

    let mut report = HarvestReport::default();
    let total_courses = root.entries.len();

    for (course_index, entry) in root.entries.iter().enumerate() {
        let (feed_url, sub_feed) = match fetch_course_feed(client, entry, reporter).await {
            Ok(fetched) => fetched,
            Err(error) => {
                reporter.report(ProgressEvent::CourseSkipped {
                    course_id: entry.id.clone(),
                    course_title: entry.title.clone(),
                    error: error.clone(),
                });
                report.skipped_courses.push((entry.title.clone(), error));
                continue;
            }
        };

        reporter.report(ProgressEvent::CourseStarted {
            course_title: entry.title.clone(),
            course_index,
            total_courses,
        });

        let course = report.store.upsert_course(entry, &feed_url);

        for sub_entry in &sub_feed.entries {
            let chapters = match resolve_subtitle_link(&sub_entry.links) {
                Ok(link) => {
                    tokio::time::sleep(options.request_delay).await;

                    match fetch_chapters(client, &link.url).await {
                        Ok(cues) => chapter_text(&cues).map_err(|source| {
                            HarvestError::ChapterRender {
                                episode: sub_entry.title.clone(),
                                source,
                            }
                        })?,
                        Err(error) => {
                            reporter.report(ProgressEvent::ChaptersUnavailable {
                                episode_title: sub_entry.title.clone(),
                                url: link.url.clone(),
                                error: error.to_string(),
                            });
                            report
                                .chapter_failures
                                .push((sub_entry.title.clone(), error.to_string()));
                            None
                        }
                    }
                }
                Err(_) => None,
            };

            let key = episode_key(sub_entry);
            let episode = course.merge_episode(
                key.clone(),
                sub_entry,
                chapters,
                enclosure_urls(&sub_entry.links),
            );

            reporter.report(ProgressEvent::EpisodeMerged {
                course_title: entry.title.clone(),
                episode_key: key,
                episode_title: episode.title.clone(),
                has_chapters: episode.has_chapters(),
            });
        }
    }

    Ok(report)
}

/// Resolve and fetch the sub-feed of a course entry
///
/// Errors are returned as display strings since they only end up in reports.
async fn fetch_course_feed<C: HttpClient>(
    client: &C,
    entry: &Entry,
    reporter: &SharedProgressReporter,
) -> Result<(String, Feed), String> {
    let feed_url = resolve_feed_link(&entry.links)
        .map_err(|e| e.to_string())?
        .to_string();

    reporter.report(ProgressEvent::FetchingFeed {
        url: feed_url.clone(),
    });

    let feed = fetch_feed(client, &feed_url)
        .await
        .map_err(|e| e.to_string())?;

    reporter.report(ProgressEvent::FeedParsed {
        url: feed_url.clone(),
        entry_count: feed.entries.len(),
    });

    Ok((feed_url, feed))
}

/// Harvest all courses and write the snapshot to `output`
///
/// Nothing is written when the harvest fails. `HarvestCompleted` is
/// reported last, after `SnapshotWritten`.
pub async fn run<C: HttpClient>(
    client: &C,
    root_url: &str,
    output: &Path,
    options: &HarvestOptions,
    reporter: &SharedProgressReporter,
) -> Result<HarvestReport, HarvestError> {
    let report = harvest_courses(client, root_url, options, reporter).await?;

    write_snapshot(&report.store, output)?;

    reporter.report(ProgressEvent::SnapshotWritten {
        path: output.to_path_buf(),
        course_count: report.store.len(),
        episode_count: report.store.episode_count(),
    });

    reporter.report(ProgressEvent::HarvestCompleted {
        course_count: report.store.len(),
        episode_count: report.store.episode_count(),
        skipped_count: report.skipped_courses.len(),
    });

    Ok(report)
}
