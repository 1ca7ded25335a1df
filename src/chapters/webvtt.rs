// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use crate::error::WebVttError;

const HEADER: &str = "WEBVTT";
const TIMING_SEPARATOR: &str = "-->";

/// Block keywords whose content is not a cue
const NON_CUE_BLOCKS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

/// A single timed cue of a WebVTT track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub start: Duration,
    pub end: Duration,
    /// Cue payload with markup removed, lines joined by `\n`
    pub text: String,
}

/// Parse a WebVTT document into its cues, in source order
///
/// A document containing only the header yields an empty list.
pub fn parse_webvtt(input: &str) -> Result<Vec<Cue>, WebVttError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let lines: Vec<&str> = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if !starts_with_keyword(lines[0], HEADER) {
        return Err(WebVttError::MissingHeader);
    }

    let mut cues = Vec::new();

    // Header block runs until the first blank line
    let body_start = lines
        .iter()
        .position(|line| line.trim().is_empty())
        .unwrap_or(lines.len());

    let mut index = body_start;
    while index < lines.len() {
        if lines[index].trim().is_empty() {
            index += 1;
            continue;
        }

        let block_start = index;
        while index < lines.len() && !lines[index].trim().is_empty() {
            index += 1;
        }

        let block = &lines[block_start..index];
        if let Some(cue) = parse_block(block, block_start + 1)? {
            cues.push(cue);
        }
    }

    Ok(cues)
}

/// Parse one blank-line delimited block; `line_number` is 1-based
fn parse_block(block: &[&str], line_number: usize) -> Result<Option<Cue>, WebVttError> {
    if NON_CUE_BLOCKS
        .iter()
        .any(|keyword| starts_with_keyword(block[0], keyword))
    {
        return Ok(None);
    }

    let timing_offset = match block.iter().take(2).position(|l| l.contains(TIMING_SEPARATOR)) {
        Some(offset) => offset,
        None => return Err(WebVttError::MissingTiming { line: line_number }),
    };

    let timing_line_number = line_number + timing_offset;
    let (start, end) = parse_timing(block[timing_offset], timing_line_number)?;

    let text = block[timing_offset + 1..]
        .iter()
        .map(|line| clean_payload(line))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Some(Cue { start, end, text }))
}

fn parse_timing(line: &str, line_number: usize) -> Result<(Duration, Duration), WebVttError> {
    let (start, rest) = line
        .split_once(TIMING_SEPARATOR)
        .ok_or(WebVttError::MissingTiming { line: line_number })?;

    // Cue settings may follow the end timestamp
    let end = rest.split_whitespace().next().unwrap_or_default();

    Ok((
        parse_timestamp(start.trim(), line_number)?,
        parse_timestamp(end, line_number)?,
    ))
}

/// Parse `mm:ss.ttt` or `hh:mm:ss.ttt`
fn parse_timestamp(value: &str, line_number: usize) -> Result<Duration, WebVttError> {
    let invalid = || WebVttError::InvalidTimestamp {
        line: line_number,
        value: value.to_string(),
    };

    let (clock, millis) = value.split_once('.').ok_or_else(invalid)?;
    let parts: Vec<&str> = clock.split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [minutes, seconds] => ("0", *minutes, *seconds),
        [hours, minutes, seconds] if !hours.is_empty() => (*hours, *minutes, *seconds),
        _ => return Err(invalid()),
    };

    let fixed_digits = |field: &str, width: usize| -> Option<u64> {
        (field.len() == width && field.bytes().all(|b| b.is_ascii_digit()))
            .then(|| field.parse().ok())
            .flatten()
    };

    let hours: u64 = hours
        .bytes()
        .all(|b| b.is_ascii_digit())
        .then(|| hours.parse().ok())
        .flatten()
        .ok_or_else(invalid)?;
    let minutes = fixed_digits(minutes, 2).filter(|m| *m < 60).ok_or_else(invalid)?;
    let seconds = fixed_digits(seconds, 2).filter(|s| *s < 60).ok_or_else(invalid)?;
    let millis = fixed_digits(millis, 3).ok_or_else(invalid)?;

    let total_millis = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;

    Ok(Duration::from_millis(total_millis))
}

/// Strip inline markup tags and decode character references
fn clean_payload(line: &str) -> String {
    let mut stripped = String::with_capacity(line.len());
    let mut in_tag = false;

    for c in line.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    html_escape::decode_html_entities(stripped.trim_end()).into_owned()
}

/// True if `line` is `keyword` alone or followed by a space or tab
fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
}
