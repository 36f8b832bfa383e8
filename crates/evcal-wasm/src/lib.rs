//! WASM bindings for evcal-core.
//!
//! Exposes event generation, share-link encoding and decoding, and the
//! calendar-text escaper to the event page. Forms and results cross the
//! boundary as JSON strings, the same shape `RawEventInput` and
//! `EventExports` serialize to.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p evcal-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/evcal_wasm.wasm
//! ```
//!
//! The page keeps its own offline cache and clipboard handling; it calls
//! `generateEvent` on submit and `parseShareQuery(location.search)` on load.

use evcal_core::{
    escape_text, generate, parse_share_request, resolve_zone, share_url, RawEventInput,
    ShareFields, ShareMode,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareRequestDto {
    #[serde(flatten)]
    fields: ShareFields,
    auto: bool,
    open: bool,
    should_generate: bool,
    should_open: bool,
}

fn parse_form(form_json: &str) -> Result<RawEventInput, JsValue> {
    serde_json::from_str(form_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid form JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Validate a form and build the calendar document and both provider links.
///
/// `form_json` is `{title, date, time, duration, location, notes, allDay}`;
/// missing keys read as empty. `time_zone` is the IANA name the page resolved
/// (`Intl.DateTimeFormat().resolvedOptions().timeZone`); an unknown or absent
/// name falls back to UTC.
///
/// Returns `{ics, filename, mimeType, googleUrl, outlookUrl}` as JSON, or
/// throws the validation message (e.g. "Event title is required").
#[wasm_bindgen(js_name = "generateEvent")]
pub fn generate_event(form_json: &str, time_zone: Option<String>) -> Result<String, JsValue> {
    let form = parse_form(form_json)?;
    let tz = resolve_zone(time_zone.as_deref());
    let exports = generate(&form, tz).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&exports)
}

/// Build a share link for the form at `base`.
///
/// The link always asks the receiving page to generate on load; with `open`
/// it also asks it to open the calendar file.
#[wasm_bindgen(js_name = "shareUrl")]
pub fn share_url_js(base: &str, form_json: &str, open: bool) -> Result<String, JsValue> {
    let form = parse_form(form_json)?;
    let mode = if open {
        ShareMode::AutoOpen
    } else {
        ShareMode::Auto
    };
    Ok(share_url(base, &ShareFields::from_input(&form), mode))
}

/// Decode a share link or `location.search`.
///
/// Returns the carried fields (absent keys are `null`) together with
/// `auto`, `open`, `shouldGenerate`, and `shouldOpen`.
#[wasm_bindgen(js_name = "parseShareQuery")]
pub fn parse_share_query(query: &str) -> Result<String, JsValue> {
    let request = parse_share_request(query);
    to_json(&ShareRequestDto {
        should_generate: request.should_generate(),
        should_open: request.should_open(),
        auto: request.auto,
        open: request.open,
        fields: request.fields,
    })
}

/// Escape text for an iCalendar TEXT property value.
#[wasm_bindgen(js_name = "escapeText")]
pub fn escape_text_js(text: &str) -> String {
    escape_text(text)
}
