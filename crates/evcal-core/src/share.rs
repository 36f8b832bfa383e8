//! Shareable form links -- raw form fields to and from a URL query string.
//!
//! The query carries the form as typed, not the canonical event, so a link
//! opened on another device fills the same form in its own timezone.
//!
//! # Keys
//!
//! `title`, `date`, `time`, `duration`, `location`, `notes`, `allday` (`1`/`0`)
//! carry fields. `auto=1` asks the page to generate outputs on load and
//! `open=1` additionally asks it to open the calendar file. A `url` value
//! (Web Share Target) is appended to the notes.

use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::event::RawEventInput;

const KEY_TITLE: &str = "title";
const KEY_DATE: &str = "date";
const KEY_TIME: &str = "time";
const KEY_DURATION: &str = "duration";
const KEY_LOCATION: &str = "location";
const KEY_NOTES: &str = "notes";
const KEY_ALL_DAY: &str = "allday";
const KEY_AUTO: &str = "auto";
const KEY_OPEN: &str = "open";
const KEY_SHARED_URL: &str = "url";

/// Form fields carried by a share link. `None` means the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShareFields {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub all_day: Option<bool>,
}

impl ShareFields {
    /// Snapshot a form. Title and location are trimmed the same way
    /// normalization trims them.
    pub fn from_input(raw: &RawEventInput) -> Self {
        Self {
            title: Some(raw.title.trim().to_string()),
            date: Some(raw.date.clone()),
            time: Some(raw.time.clone()),
            duration: Some(raw.duration.clone()),
            location: Some(raw.location.trim().to_string()),
            notes: Some(raw.notes.clone()),
            all_day: Some(raw.all_day),
        }
    }

    /// Copy the carried values onto a form. Empty values leave the form
    /// field at whatever it already holds.
    pub fn apply_to(&self, raw: &mut RawEventInput) {
        let slots: [(&Option<String>, &mut String); 6] = [
            (&self.title, &mut raw.title),
            (&self.date, &mut raw.date),
            (&self.time, &mut raw.time),
            (&self.duration, &mut raw.duration),
            (&self.location, &mut raw.location),
            (&self.notes, &mut raw.notes),
        ];
        for (value, field) in slots {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                *field = v.to_string();
            }
        }
        if let Some(all_day) = self.all_day {
            raw.all_day = all_day;
        }
    }

    fn pairs(&self) -> [(&'static str, Option<&str>); 6] {
        [
            (KEY_TITLE, self.title.as_deref()),
            (KEY_DATE, self.date.as_deref()),
            (KEY_TIME, self.time.as_deref()),
            (KEY_DURATION, self.duration.as_deref()),
            (KEY_LOCATION, self.location.as_deref()),
            (KEY_NOTES, self.notes.as_deref()),
        ]
    }
}

/// What a share link asks the receiving page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareMode {
    /// Only prefill the form.
    #[default]
    Fill,
    /// Prefill and render the outputs (`auto=1`).
    Auto,
    /// Prefill, render, and open the calendar file (`auto=1&open=1`).
    AutoOpen,
}

/// A decoded share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareRequest {
    pub fields: ShareFields,
    pub auto: bool,
    pub open: bool,
}

impl ShareRequest {
    /// Outputs are rendered on load when `auto=1` is set or when the link
    /// carries a title or a date.
    pub fn should_generate(&self) -> bool {
        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        self.auto || has(&self.fields.title) || has(&self.fields.date)
    }

    /// Whether the calendar file should be opened right after generating.
    pub fn should_open(&self) -> bool {
        self.open && self.should_generate()
    }
}

/// Encode the fields as a query string, without the leading `?`.
/// Absent fields are omitted; everything present is percent-encoded.
pub fn to_query(fields: &ShareFields) -> String {
    let mut parts: Vec<String> = fields
        .pairs()
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, encode(v))))
        .collect();
    if let Some(all_day) = fields.all_day {
        parts.push(format!("{}={}", KEY_ALL_DAY, if all_day { "1" } else { "0" }));
    }
    parts.join("&")
}

/// Decode the form fields from a query string. The exact inverse of [`to_query`].
pub fn from_query(query: &str) -> ShareFields {
    parse_share_request(query).fields
}

/// Encode the fields plus the flags for `mode`.
pub fn to_query_with_mode(fields: &ShareFields, mode: ShareMode) -> String {
    let mut query = to_query(fields);
    let flags = match mode {
        ShareMode::Fill => "",
        ShareMode::Auto => "auto=1",
        ShareMode::AutoOpen => "auto=1&open=1",
    };
    if !flags.is_empty() {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(flags);
    }
    query
}

/// A full share link: `base` with any existing query or fragment replaced.
pub fn share_url(base: &str, fields: &ShareFields, mode: ShareMode) -> String {
    let base = base.split(['?', '#']).next().unwrap_or_default();
    format!("{}?{}", base, to_query_with_mode(fields, mode))
}

/// Decode a share link. Accepts a bare query (with or without `?`) or a full
/// URL. Unknown keys are ignored; for repeated keys the first one wins.
pub fn parse_share_request(input: &str) -> ShareRequest {
    // A `?` only starts the query when what precedes it is a URL or path,
    // not a key=value pair whose value happens to contain one.
    let query = match input.split_once('?') {
        Some((head, q)) if !head.contains(['=', '&']) => q,
        _ => input,
    };
    let query = query.split('#').next().unwrap_or_default();

    let mut request = ShareRequest::default();
    let mut shared_url: Option<String> = None;
    let mut all_day: Option<String> = None;
    let mut auto: Option<String> = None;
    let mut open: Option<String> = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key);
        let value = decode_component(value);
        let fields = &mut request.fields;
        let slot = match key.as_str() {
            KEY_TITLE => &mut fields.title,
            KEY_DATE => &mut fields.date,
            KEY_TIME => &mut fields.time,
            KEY_DURATION => &mut fields.duration,
            KEY_LOCATION => &mut fields.location,
            KEY_NOTES => &mut fields.notes,
            KEY_ALL_DAY => &mut all_day,
            KEY_AUTO => &mut auto,
            KEY_OPEN => &mut open,
            KEY_SHARED_URL => &mut shared_url,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    request.fields.all_day = all_day.filter(|v| !v.is_empty()).map(|v| v == "1");
    request.auto = auto.as_deref() == Some("1");
    request.open = open.as_deref() == Some("1");

    if let Some(url) = shared_url.filter(|u| !u.is_empty()) {
        let notes = request.fields.notes.get_or_insert_with(String::new);
        if !notes.is_empty() {
            notes.push('\n');
        }
        notes.push_str(&url);
    }

    request
}

/// Percent-decode one query component. `+` is a space, as in form encoding;
/// malformed UTF-8 is replaced rather than rejected.
fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
