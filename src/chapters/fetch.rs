// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ChapterError;
use crate::http::HttpClient;

use super::srt::render_srt;
use super::webvtt::{Cue, parse_webvtt};

/// Fetch a WebVTT subtitle track and parse its cues
///
/// Only a 200 response is accepted.
pub async fn fetch_chapters<C: HttpClient>(
    client: &C,
    url: &str,
) -> Result<Vec<Cue>, ChapterError> {
    let response = client
        .get(url)
        .await
        .map_err(|e| ChapterError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    if response.status != 200 {
        return Err(ChapterError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    let text = std::str::from_utf8(&response.body).map_err(|_| ChapterError::InvalidEncoding {
        url: url.to_string(),
    })?;

    parse_webvtt(text).map_err(|e| ChapterError::Parse {
        url: url.to_string(),
        source: e,
    })
}

/// Turn parsed cues into chapter text
///
/// Returns `None` when there are no cues, so existing chapter text is kept.
pub fn chapter_text(cues: &[Cue]) -> Result<Option<String>, ChapterError> {
    if cues.is_empty() {
        return Ok(None);
    }

    Ok(Some(render_srt(cues)?))
}
