//! Event normalization -- raw form input into a validated canonical event.
//!
//! The form is untrusted text. [`normalize`] validates it and resolves the
//! all-day/timed distinction. For timed events it converts the local wall-clock
//! start into an absolute instant in the injected zone and derives the end
//! from the duration.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dst::{self, DstPolicy};
use crate::error::{Result, ValidationError};

/// Duration applied when the form's duration is missing or not a positive integer.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// Last year with a four-digit rendering.
const MAX_YEAR: i32 = 9999;

/// Event fields exactly as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawEventInput {
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM` or `HH:MM:SS`. Ignored for all-day events.
    pub time: String,
    /// Duration in minutes as typed. See [`parse_duration_minutes`].
    pub duration: String,
    pub location: String,
    pub notes: String,
    pub all_day: bool,
}

impl RawEventInput {
    /// Fill an empty date with today and an empty time with the current
    /// minute, the way the form starts out.
    pub fn with_defaults(mut self, now_local: NaiveDateTime) -> Self {
        if self.date.is_empty() {
            self.date = now_local.format("%Y-%m-%d").to_string();
        }
        if self.time.is_empty() {
            self.time = now_local.format("%H:%M").to_string();
        }
        self
    }
}

/// When the event happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSpan {
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// A single civil day. `end` is always `start + 1 day`.
    AllDay { start: NaiveDate, end: NaiveDate },
}

/// The normalized event every encoder consumes. Only [`normalize`] builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEvent {
    title: String,
    span: EventSpan,
    location: Option<String>,
    notes: Option<String>,
    time_zone: Tz,
}

impl CanonicalEvent {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn span(&self) -> EventSpan {
        self.span
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.span, EventSpan::AllDay { .. })
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The zone the form input was interpreted in.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Start as an absolute instant. All-day events start at local midnight.
    pub fn start(&self) -> DateTime<Utc> {
        match self.span {
            EventSpan::Timed { start, .. } => start,
            EventSpan::AllDay { start, .. } => dst::local_midnight(&self.time_zone, start),
        }
    }

    /// End as an absolute instant. All-day events end at the next local midnight.
    pub fn end(&self) -> DateTime<Utc> {
        match self.span {
            EventSpan::Timed { end, .. } => end,
            EventSpan::AllDay { end, .. } => dst::local_midnight(&self.time_zone, end),
        }
    }

    /// Length of the span: minutes for timed events, exactly one day for all-day ones.
    pub fn duration(&self) -> Duration {
        match self.span {
            EventSpan::Timed { start, end } => end - start,
            EventSpan::AllDay { start, end } => end - start,
        }
    }
}

/// Normalize raw form input in `tz`, shifting DST-gap times forward.
///
/// # Errors
/// Returns a validation error when the title or date is empty, when a timed
/// event has no start time, or when the date or time cannot be read.
pub fn normalize(raw: &RawEventInput, tz: Tz) -> Result<CanonicalEvent> {
    normalize_with_policy(raw, tz, DstPolicy::default())
}

/// Identical to [`normalize`] with an explicit DST gap policy.
///
/// # Errors
/// As [`normalize`], plus `ValidationError::NonexistentLocalTime` for gap
/// times under [`DstPolicy::Reject`].
pub fn normalize_with_policy(
    raw: &RawEventInput,
    tz: Tz,
    policy: DstPolicy,
) -> Result<CanonicalEvent> {
    let title = raw.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle.into());
    }
    let date_str = raw.date.trim();
    if date_str.is_empty() {
        return Err(ValidationError::MissingDate.into());
    }
    let date = parse_date(date_str)?;

    let span = if raw.all_day {
        let end = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ValidationError::InvalidDate(date_str.to_string()))?;
        check_renderable(end.year(), date_str)?;
        EventSpan::AllDay { start: date, end }
    } else {
        let time_str = raw.time.trim();
        if time_str.is_empty() {
            return Err(ValidationError::MissingTime.into());
        }
        let time = parse_time(time_str)?;
        let start = dst::resolve_local(&tz, date.and_time(time), policy)?;
        check_renderable(start.year(), date_str)?;
        // Durations too large to represent get the default, like any other bad value.
        let end = Duration::try_minutes(parse_duration_minutes(&raw.duration))
            .and_then(|d| start.checked_add_signed(d))
            .filter(|end| end.year() <= MAX_YEAR)
            .or_else(|| start.checked_add_signed(Duration::minutes(DEFAULT_DURATION_MINUTES)))
            .ok_or_else(|| ValidationError::InvalidDate(date_str.to_string()))?;
        check_renderable(end.year(), date_str)?;
        EventSpan::Timed { start, end }
    };

    debug!(?span, zone = tz.name(), "normalized event");

    Ok(CanonicalEvent {
        title: title.to_string(),
        span,
        location: non_empty(raw.location.trim()),
        notes: non_empty(&raw.notes),
        time_zone: tz,
    })
}

/// Read a duration the way a browser `parseInt` would: optional leading
/// whitespace and sign, then as many digits as are present. Anything that is
/// not a positive number of minutes becomes [`DEFAULT_DURATION_MINUTES`].
pub fn parse_duration_minutes(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(n) if !negative && n > 0 => n,
        _ => DEFAULT_DURATION_MINUTES,
    }
}

/// Strictly `YYYY-MM-DD`. chrono's `%Y` also takes signed and longer years,
/// which have no four-digit calendar rendering.
fn parse_date(s: &str) -> std::result::Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(s.to_string());
    let shaped = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())
}

/// Every rendered date must keep a four-digit year, including the UTC
/// instants of timed events and the exclusive end of an all-day event.
fn check_renderable(year: i32, date_str: &str) -> std::result::Result<(), ValidationError> {
    if (0..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate(date_str.to_string()))
    }
}

fn parse_time(s: &str) -> std::result::Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime(s.to_string()))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
