//! Date and date-time renderings used by the export encoders.
//!
//! - [`DateForm::CivilDate`]: `20251225`, a bare calendar date (all-day events)
//! - [`DateForm::CompactUtc`]: `20250310T133000Z`, the iCalendar UTC form
//! - [`DateForm::ExtendedIso`]: `2025-03-10T13:30:00.000Z`, full ISO 8601

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    CivilDate,
    CompactUtc,
    ExtendedIso,
}

/// Render an instant in the requested form.
///
/// `CompactUtc` and `ExtendedIso` always convert to UTC first. `CivilDate`
/// takes the calendar date in the instant's own zone.
pub fn format_instant<Z: TimeZone>(instant: &DateTime<Z>, form: DateForm) -> String {
    match form {
        DateForm::CivilDate => format_date(instant.date_naive()),
        DateForm::CompactUtc => instant
            .with_timezone(&Utc)
            .format("%Y%m%dT%H%M%SZ")
            .to_string(),
        DateForm::ExtendedIso => instant
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
