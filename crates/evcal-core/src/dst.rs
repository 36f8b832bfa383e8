//! Timezone resolution and DST handling for wall-clock form input.
//!
//! Form dates and times are local wall-clock values. Turning them into
//! absolute instants needs a zone, and a policy for the two DST edge cases:
//! overlaps (a wall time that happens twice) and gaps (a wall time that never
//! happens).

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{EventError, Result, ValidationError};

/// Policy for wall-clock times that fall in a DST gap.
///
/// Overlapping wall times always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DstPolicy {
    /// Interpret the time with the offset in force before the gap, so 2:30 AM
    /// during spring forward lands on 3:30 AM. This is what browsers do.
    #[default]
    ShiftForward,
    /// Refuse times inside the gap.
    Reject,
}

/// Parse an IANA timezone name.
///
/// # Errors
/// Returns `EventError::InvalidTimezone` if the name is not a known zone.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| EventError::InvalidTimezone(name.to_string()))
}

/// Resolve the host's zone name, falling back to UTC when it is missing or unknown.
pub fn resolve_zone(name: Option<&str>) -> Tz {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => parse_zone(n).unwrap_or_else(|_| {
            warn!(zone = n, "unknown timezone, falling back to UTC");
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

/// Convert a local wall-clock time in `tz` to an absolute UTC instant.
///
/// # Errors
/// Returns `ValidationError::NonexistentLocalTime` when the time falls in a
/// DST gap and `policy` is [`DstPolicy::Reject`].
pub fn resolve_local(
    tz: &Tz,
    local: NaiveDateTime,
    policy: DstPolicy,
) -> std::result::Result<DateTime<Utc>, ValidationError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Reject => Err(ValidationError::NonexistentLocalTime(
                local.format("%Y-%m-%d %H:%M").to_string(),
            )),
            DstPolicy::ShiftForward => Ok(shift_forward(tz, local)),
        },
    }
}

/// Local midnight of `date` in `tz`. Zones whose midnight falls in a gap
/// (a few historical South American rules) shift forward.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => shift_forward(tz, midnight),
    }
}

/// Apply the offset that was in force a day before `local`. Transitions are
/// never less than a day apart, so that is the offset just before the gap.
fn shift_forward(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let probe = local - Duration::days(1);
    let offset = tz.offset_from_utc_datetime(&probe).fix();
    (local - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

