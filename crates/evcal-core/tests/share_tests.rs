//! Tests for shareable form links: query encoding and decoding, flags,
//! Web Share Target `url` handling, and applying decoded fields to a form.

use evcal_core::share::{to_query_with_mode, ShareRequest};
use evcal_core::{
    from_query, parse_share_request, share_url, to_query, RawEventInput, ShareFields, ShareMode,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn fields() -> ShareFields {
    ShareFields {
        title: Some("Team Sync".into()),
        date: Some("2025-03-10".into()),
        time: Some("14:30".into()),
        duration: Some("45".into()),
        location: Some("Room 4".into()),
        notes: Some("Agenda: a & b = c\nThen lunch".into()),
        all_day: Some(false),
    }
}

// ── Query encoding ───────────────────────────────────────────────────────────

#[test]
fn query_has_fixed_key_order() {
    assert_eq!(
        to_query(&fields()),
        "title=Team%20Sync&date=2025-03-10&time=14%3A30&duration=45\
         &location=Room%204&notes=Agenda%3A%20a%20%26%20b%20%3D%20c%0AThen%20lunch&allday=0"
    );
}

#[test]
fn absent_fields_are_omitted() {
    let only_title = ShareFields {
        title: Some("Lunch".into()),
        ..Default::default()
    };
    assert_eq!(to_query(&only_title), "title=Lunch");
    assert_eq!(to_query(&ShareFields::default()), "");
}

#[test]
fn round_trip_is_exact() {
    let original = fields();
    assert_eq!(from_query(&to_query(&original)), original);
}

#[test]
fn round_trip_keeps_reserved_and_non_ascii_characters() {
    let original = ShareFields {
        title: Some("Встреча & обед = 🍜".into()),
        notes: Some("a+b %20 ?x=1#frag".into()),
        location: Some(String::new()),
        all_day: Some(true),
        ..Default::default()
    };
    assert_eq!(from_query(&to_query(&original)), original);
}

#[test]
fn modes_append_flags() {
    let only_title = ShareFields {
        title: Some("Lunch".into()),
        ..Default::default()
    };
    assert_eq!(to_query_with_mode(&only_title, ShareMode::Fill), "title=Lunch");
    assert_eq!(
        to_query_with_mode(&only_title, ShareMode::Auto),
        "title=Lunch&auto=1"
    );
    assert_eq!(
        to_query_with_mode(&only_title, ShareMode::AutoOpen),
        "title=Lunch&auto=1&open=1"
    );
    assert_eq!(
        to_query_with_mode(&ShareFields::default(), ShareMode::Auto),
        "auto=1"
    );
}

#[test]
fn share_url_replaces_existing_query_and_fragment() {
    let only_title = ShareFields {
        title: Some("Lunch".into()),
        ..Default::default()
    };
    assert_eq!(
        share_url("https://example.org/event/?title=Old#top", &only_title, ShareMode::AutoOpen),
        "https://example.org/event/?title=Lunch&auto=1&open=1"
    );
}

// ── Query decoding ───────────────────────────────────────────────────────────

#[test]
fn full_url_and_leading_question_mark_are_accepted() {
    let q = "title=Lunch&allday=1";
    let expected = parse_share_request(q);

    assert_eq!(parse_share_request(&format!("?{}", q)), expected);
    assert_eq!(
        parse_share_request(&format!("https://example.org/app/?{}#x", q)),
        expected
    );
    assert_eq!(expected.fields.title.as_deref(), Some("Lunch"));
    assert_eq!(expected.fields.all_day, Some(true));
}

#[test]
fn question_mark_inside_a_bare_query_value_is_kept() {
    let fields = from_query("title=what?&date=2025-01-01");
    assert_eq!(fields.title.as_deref(), Some("what?"));
    assert_eq!(fields.date.as_deref(), Some("2025-01-01"));

    let request = parse_share_request("https://example.org/?title=why?&notes=a?b");
    assert_eq!(request.fields.title.as_deref(), Some("why?"));
    assert_eq!(request.fields.notes.as_deref(), Some("a?b"));
}

#[test]
fn plus_decodes_as_space() {
    let fields = from_query("title=Team+Sync&notes=1%2B1");
    assert_eq!(fields.title.as_deref(), Some("Team Sync"));
    assert_eq!(fields.notes.as_deref(), Some("1+1"));
}

#[test]
fn unknown_keys_are_ignored_and_first_value_wins() {
    let fields = from_query("foo=bar&title=First&title=Second&&=x");
    assert_eq!(fields.title.as_deref(), Some("First"));
    assert_eq!(
        fields,
        ShareFields {
            title: Some("First".into()),
            ..Default::default()
        }
    );
}

#[test]
fn malformed_escapes_do_not_fail() {
    let fields = from_query("title=100%&notes=%ZZ&location=%FF");
    assert!(fields.title.is_some());
    assert!(fields.notes.is_some());
    assert!(fields.location.is_some());
}

#[test]
fn all_day_flag_values() {
    assert_eq!(from_query("allday=1").all_day, Some(true));
    assert_eq!(from_query("allday=0").all_day, Some(false));
    assert_eq!(from_query("allday=yes").all_day, Some(false));
    assert_eq!(from_query("allday=").all_day, None);
    assert_eq!(from_query("title=x").all_day, None);
}

// ── Flags and generate triggers ──────────────────────────────────────────────

#[test]
fn auto_and_open_flags() {
    let r = parse_share_request("title=Lunch&auto=1&open=1");
    assert!(r.auto && r.open);
    assert!(r.should_generate());
    assert!(r.should_open());

    let r = parse_share_request("auto=true&open=0");
    assert!(!r.auto && !r.open);
}

#[test]
fn title_or_date_alone_triggers_generation() {
    assert!(parse_share_request("title=Lunch").should_generate());
    assert!(parse_share_request("date=2025-03-10").should_generate());
    assert!(!parse_share_request("time=10:00&duration=60").should_generate());
    assert!(!parse_share_request("title=&date=").should_generate());
    assert!(parse_share_request("auto=1").should_generate());
}

#[test]
fn open_without_generate_does_nothing() {
    let r = parse_share_request("time=10:00&open=1");
    assert!(r.open);
    assert!(!r.should_open());
}

#[test]
fn shared_url_is_appended_to_notes() {
    let r = parse_share_request("notes=See%20this&url=https%3A%2F%2Fexample.org%2Fa");
    assert_eq!(
        r.fields.notes.as_deref(),
        Some("See this\nhttps://example.org/a")
    );

    let r = parse_share_request("url=https%3A%2F%2Fexample.org%2Fa");
    assert_eq!(r.fields.notes.as_deref(), Some("https://example.org/a"));

    let r: ShareRequest = parse_share_request("notes=keep&url=");
    assert_eq!(r.fields.notes.as_deref(), Some("keep"));
}

// ── Form application ─────────────────────────────────────────────────────────

#[test]
fn from_input_trims_title_and_location() {
    let raw = RawEventInput {
        title: "  Lunch ".into(),
        location: " Cafe  ".into(),
        notes: " as typed ".into(),
        all_day: true,
        ..Default::default()
    };
    let f = ShareFields::from_input(&raw);

    assert_eq!(f.title.as_deref(), Some("Lunch"));
    assert_eq!(f.location.as_deref(), Some("Cafe"));
    assert_eq!(f.notes.as_deref(), Some(" as typed "));
    assert_eq!(f.all_day, Some(true));
}

#[test]
fn apply_skips_empty_values() {
    let mut form = RawEventInput {
        title: "Default".into(),
        date: "2025-01-01".into(),
        time: "09:00".into(),
        duration: "30".into(),
        ..Default::default()
    };
    from_query("title=Lunch&date=&duration=90&allday=1").apply_to(&mut form);

    assert_eq!(form.title, "Lunch");
    assert_eq!(form.date, "2025-01-01");
    assert_eq!(form.time, "09:00");
    assert_eq!(form.duration, "90");
    assert!(form.all_day);
}

#[test]
fn form_survives_a_share_round_trip() {
    let original = RawEventInput {
        title: "Dinner & drinks".into(),
        date: "2025-05-02".into(),
        time: "19:00".into(),
        duration: "120".into(),
        location: "Rue de l'Été 5".into(),
        notes: "Line1\nLine2; ok".into(),
        all_day: false,
    };
    let query = to_query(&ShareFields::from_input(&original));

    let mut received = RawEventInput::default();
    from_query(&query).apply_to(&mut received);
    assert_eq!(received, original);
}
