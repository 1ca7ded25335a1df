// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt::{self, Write};
use std::time::Duration;

use super::webvtt::Cue;

/// Format a cue boundary as `HH:MM:SS,mmm`
pub fn format_srt_timestamp(timestamp: Duration) -> String {
    let total_millis = timestamp.as_millis();
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis / 60_000) % 60;
    let seconds = (total_millis / 1_000) % 60;
    let millis = total_millis % 1_000;

    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Render cues as an SRT track
///
/// Each block is the 1-based cue index, the timing line and the cue text,
/// with a blank line between consecutive blocks.
pub fn render_srt(cues: &[Cue]) -> Result<String, fmt::Error> {
    let mut out = String::new();

    for (index, cue) in cues.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        writeln!(out, "{}", index + 1)?;
        writeln!(
            out,
            "{} --> {}",
            format_srt_timestamp(cue.start),
            format_srt_timestamp(cue.end)
        )?;
        for line in cue.text.lines() {
            writeln!(out, "{line}")?;
        }
    }

    Ok(out)
}
