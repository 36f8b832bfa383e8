//! Provider deep links -- prefilled "create event" URLs for web calendars.
//!
//! Free-text fields are percent-encoded as opaque query values. iCalendar
//! TEXT escaping does not apply here. Empty location and notes are still sent
//! as empty parameters, which is the query shape both providers expect.

use crate::datefmt::{format_date, format_instant, DateForm};
use crate::event::{CanonicalEvent, EventSpan};
use urlencoding::encode;

pub const GOOGLE_RENDER_URL: &str = "https://calendar.google.com/calendar/render";
pub const OUTLOOK_COMPOSE_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

/// A web calendar that accepts prefilled compose links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Outlook,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Outlook];

    pub fn label(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Outlook => "outlook",
        }
    }

    pub fn deep_link(self, event: &CanonicalEvent) -> String {
        match self {
            Provider::Google => google_url(event),
            Provider::Outlook => outlook_url(event),
        }
    }
}

/// Google Calendar template link.
///
/// `dates` is `<start>/<end>` in the document's compact forms: UTC
/// `YYYYMMDDTHHMMSSZ` for timed events, `YYYYMMDD` for all-day ones. `ctz`
/// carries the zone the event was entered in.
pub fn google_url(event: &CanonicalEvent) -> String {
    let dates = match event.span() {
        EventSpan::AllDay { start, end } => format!("{}/{}", format_date(start), format_date(end)),
        EventSpan::Timed { start, end } => format!(
            "{}/{}",
            format_instant(&start, DateForm::CompactUtc),
            format_instant(&end, DateForm::CompactUtc)
        ),
    };
    format!(
        "{}?action=TEMPLATE&text={}&dates={}&details={}&location={}&ctz={}",
        GOOGLE_RENDER_URL,
        encode(event.title()),
        dates,
        encode(event.notes().unwrap_or_default()),
        encode(event.location().unwrap_or_default()),
        encode(event.time_zone().name()),
    )
}

/// Outlook on the web compose link. `startdt`/`enddt` are extended ISO 8601
/// instants in UTC. An all-day event spans local midnight to local midnight.
pub fn outlook_url(event: &CanonicalEvent) -> String {
    format!(
        "{}?subject={}&body={}&location={}&startdt={}&enddt={}",
        OUTLOOK_COMPOSE_URL,
        encode(event.title()),
        encode(event.notes().unwrap_or_default()),
        encode(event.location().unwrap_or_default()),
        encode(&format_instant(&event.start(), DateForm::ExtendedIso)),
        encode(&format_instant(&event.end(), DateForm::ExtendedIso)),
    )
}
