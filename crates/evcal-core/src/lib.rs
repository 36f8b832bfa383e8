//! # evcal-core
//!
//! Turns a small event form (title, date, time or all-day, duration, location,
//! notes) into a downloadable `.ics` calendar file and prefilled Google
//! Calendar and Outlook links.
//!
//! Raw form input is normalized once into a [`CanonicalEvent`]. The encoders
//! then consume that event independently. Every function here is pure apart
//! from the UID and DTSTAMP minted for a document, which can be injected
//! through [`Stamp`].
//!
//! ## Quick start
//!
//! ```rust
//! use evcal_core::{generate, RawEventInput};
//!
//! let form = RawEventInput {
//!     title: "Team Sync".into(),
//!     date: "2025-03-10".into(),
//!     time: "14:30".into(),
//!     duration: "45".into(),
//!     ..Default::default()
//! };
//! let out = generate(&form, chrono_tz::Tz::UTC).unwrap();
//! assert!(out.ics.contains("DTSTART:20250310T143000Z"));
//! assert!(out.google_url.contains("dates=20250310T143000Z/20250310T151500Z"));
//! assert_eq!(out.filename, "Team_Sync.ics");
//! ```
//!
//! ## Modules
//!
//! - [`event`]: raw form input → validated canonical event
//! - [`dst`]: zone lookup and DST gap/overlap resolution
//! - [`datefmt`]: civil date, compact UTC, and extended ISO renderings
//! - [`escape`]: iCalendar TEXT escaping
//! - [`ics`]: calendar document encoder
//! - [`links`]: Google and Outlook deep links
//! - [`share`]: form fields ↔ shareable URL query
//! - [`export`]: the all-or-nothing generate action and download naming
//! - [`error`]: Error types

pub mod datefmt;
pub mod dst;
pub mod error;
pub mod escape;
pub mod event;
pub mod export;
pub mod ics;
pub mod links;
pub mod share;

pub use dst::{parse_zone, resolve_zone, DstPolicy};
pub use error::{EventError, ValidationError};
pub use escape::{escape_text, unescape_text};
pub use event::{normalize, normalize_with_policy, CanonicalEvent, EventSpan, RawEventInput};
pub use export::{download_filename, generate, generate_with_stamp, EventExports};
pub use ics::Stamp;
pub use links::{google_url, outlook_url, Provider};
pub use share::{
    from_query, parse_share_request, share_url, to_query, ShareFields, ShareMode, ShareRequest,
};
