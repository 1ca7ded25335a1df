// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when fetching or parsing Atom feeds
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for feed {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse Atom feed: {0}")]
    ParseFailed(#[from] atom_syndication::Error),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised when an expected link is absent from an entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("feed link not found")]
    FeedLinkNotFound,

    #[error("subtitle link not found")]
    SubtitleLinkNotFound,
}

/// Errors that can occur when parsing WebVTT subtitle data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebVttError {
    #[error("Missing WEBVTT header")]
    MissingHeader,

    #[error("Invalid timestamp '{value}' on line {line}")]
    InvalidTimestamp { line: usize, value: String },

    #[error("Cue block on line {line} has no timing line")]
    MissingTiming { line: usize },
}

/// Errors that can occur while turning a subtitle track into chapter text
#[derive(Error, Debug)]
pub enum ChapterError {
    #[error("HTTP request failed for {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("status code {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Subtitle track at {url} is not valid UTF-8")]
    InvalidEncoding { url: String },

    #[error("Failed to parse WebVTT from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: WebVttError,
    },

    #[error("Failed to render chapters as SRT: {0}")]
    Render(#[from] std::fmt::Error),
}

/// Errors that can occur when writing or reading the course snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Failed to write snapshot file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move snapshot into place at {path}: {source}")]
    RenameFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read snapshot file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot JSON in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level errors for a harvest run
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Root feed error: {0}")]
    RootFeed(#[from] FeedError),

    #[error("Chapter rendering failed for episode '{episode}': {source}")]
    ChapterRender {
        episode: String,
        #[source]
        source: ChapterError,
    },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}
