//! The generate action: one form submission in, every export artifact out.

use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::event::{normalize, RawEventInput};
use crate::ics::{self, Stamp};
use crate::links::{google_url, outlook_url, Provider};

/// Longest slug, in characters, used for the download filename.
const MAX_SLUG_CHARS: usize = 40;
const FALLBACK_SLUG: &str = "event";

/// Everything produced for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventExports {
    pub ics: String,
    pub filename: String,
    pub mime_type: &'static str,
    pub google_url: String,
    pub outlook_url: String,
}

impl EventExports {
    pub fn link(&self, provider: Provider) -> &str {
        match provider {
            Provider::Google => &self.google_url,
            Provider::Outlook => &self.outlook_url,
        }
    }
}

/// Validate and normalize `raw` in `tz`, then build every artifact.
///
/// All or nothing: a validation failure returns before any output is built.
///
/// # Errors
/// Returns `EventError::Validation` when the form is incomplete or unreadable.
pub fn generate(raw: &RawEventInput, tz: Tz) -> Result<EventExports> {
    generate_with_stamp(raw, tz, &Stamp::now())
}

/// [`generate`] with a fixed document UID and DTSTAMP.
///
/// # Errors
/// As [`generate`].
pub fn generate_with_stamp(raw: &RawEventInput, tz: Tz, stamp: &Stamp) -> Result<EventExports> {
    let event = normalize(raw, tz)?;
    let exports = EventExports {
        ics: ics::encode_with_stamp(&event, stamp),
        filename: download_filename(event.title()),
        mime_type: ics::MIME_TYPE,
        google_url: google_url(&event),
        outlook_url: outlook_url(&event),
    };
    debug!(filename = %exports.filename, uid = %stamp.uid, "generated event exports");
    Ok(exports)
}

/// File name for the downloadable document: the title with whitespace runs
/// turned into `_`, characters that are unsafe in file names dropped, capped
/// at 40 characters, and `event` when nothing is left.
pub fn download_filename(title: &str) -> String {
    let mut slug = String::new();
    let mut count = 0;
    let mut in_space = false;
    for c in title.chars() {
        if count == MAX_SLUG_CHARS {
            break;
        }
        if c.is_whitespace() {
            if !in_space {
                slug.push('_');
                count += 1;
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            continue;
        }
        slug.push(c);
        count += 1;
    }
    if slug.trim_matches(['_', '.']).is_empty() {
        slug = FALLBACK_SLUG.to_string();
    }
    format!("{}.ics", slug)
}
