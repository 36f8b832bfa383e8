//! Calendar document encoder -- canonical event into a single-event VCALENDAR.
//!
//! The document layout is fixed:
//!
//! ```text
//! BEGIN:VCALENDAR
//! VERSION:2.0
//! PRODID:-//Event Configurator//EN
//! CALSCALE:GREGORIAN
//! METHOD:PUBLISH
//! BEGIN:VEVENT
//! UID:1741613400000-k3j9x0q2@event.local
//! DTSTAMP:20250310T120000Z
//! DTSTART:20250310T133000Z          (or DTSTART;VALUE=DATE:20251225)
//! DTEND:20250310T141500Z            (or DTEND;VALUE=DATE:20251226)
//! SUMMARY:Team Sync
//! LOCATION:Room 4                   (only when set)
//! DESCRIPTION:Agenda\, notes        (only when set)
//! END:VEVENT
//! END:VCALENDAR
//! ```
//!
//! Lines are joined with CRLF. Lines longer than 75 octets are folded.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::datefmt::{format_date, format_instant, DateForm};
use crate::escape::escape_text;
use crate::event::{CanonicalEvent, EventSpan};

pub const PRODID: &str = "-//Event Configurator//EN";

/// MIME type for the downloadable document.
pub const MIME_TYPE: &str = "text/calendar;charset=utf-8";

const UID_DOMAIN: &str = "event.local";

/// Maximum content line length in octets, excluding the CRLF.
const FOLD_LIMIT: usize = 75;

/// The per-document values that are not derived from the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub uid: String,
    pub dtstamp: DateTime<Utc>,
}

impl Stamp {
    /// A fresh UID and the current time.
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            uid: mint_uid(now),
            dtstamp: now,
        }
    }
}

/// `<unix millis>-<random base36>@event.local`
fn mint_uid(now: DateTime<Utc>) -> String {
    let (random, _) = Uuid::new_v4().as_u64_pair();
    format!("{}-{}@{}", now.timestamp_millis(), to_base36(random), UID_DOMAIN)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(13);
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Encode an event into a complete calendar document with a fresh [`Stamp`].
pub fn encode(event: &CanonicalEvent) -> String {
    encode_with_stamp(event, &Stamp::now())
}

/// Encode an event with a caller-supplied UID and DTSTAMP.
pub fn encode_with_stamp(event: &CanonicalEvent, stamp: &Stamp) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".into(),
        "METHOD:PUBLISH".into(),
        "BEGIN:VEVENT".into(),
        format!("UID:{}", stamp.uid),
        format!(
            "DTSTAMP:{}",
            format_instant(&stamp.dtstamp, DateForm::CompactUtc)
        ),
    ];

    match event.span() {
        EventSpan::AllDay { start, end } => {
            lines.push(format!("DTSTART;VALUE=DATE:{}", format_date(start)));
            lines.push(format!("DTEND;VALUE=DATE:{}", format_date(end)));
        }
        EventSpan::Timed { start, end } => {
            lines.push(format!(
                "DTSTART:{}",
                format_instant(&start, DateForm::CompactUtc)
            ));
            lines.push(format!("DTEND:{}", format_instant(&end, DateForm::CompactUtc)));
        }
    }

    lines.push(format!("SUMMARY:{}", text_value(event.title())));
    if let Some(location) = event.location() {
        lines.push(format!("LOCATION:{}", text_value(location)));
    }
    if let Some(notes) = event.notes() {
        lines.push(format!("DESCRIPTION:{}", text_value(notes)));
    }
    lines.push("END:VEVENT".into());
    lines.push("END:VCALENDAR".into());

    lines
        .iter()
        .map(|line| fold_line(line))
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Escape a TEXT value. Textareas may hand over CRLF or bare CR; both become
/// a single escaped newline.
fn text_value(text: &str) -> String {
    escape_text(&text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Fold a content line at 75 octets (RFC 5545 §3.1). Continuation lines start
/// with a single space, which counts toward their 75. Multi-byte characters
/// are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= FOLD_LIMIT {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / FOLD_LIMIT * 3);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > FOLD_LIMIT {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out
}
