mod fetch;
mod srt;
mod webvtt;

pub use fetch::{chapter_text, fetch_chapters};
pub use srt::{format_srt_timestamp, render_srt};
pub use webvtt::{Cue, parse_webvtt};
