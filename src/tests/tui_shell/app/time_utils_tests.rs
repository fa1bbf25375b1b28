use super::*;

fn at(ts: &str) -> OffsetDateTime {
    OffsetDateTime::parse(ts, &Rfc3339).unwrap()
}

#[test]
fn relative_ages_step_through_units() {
    let now = at("2026-03-15T12:00:00Z");
    assert_eq!(fmt_since("2026-03-15T11:59:30Z", now).as_deref(), Some("just now"));
    assert_eq!(fmt_since("2026-03-15T11:15:00Z", now).as_deref(), Some("45m ago"));
    assert_eq!(fmt_since("2026-03-14T12:00:00Z", now).as_deref(), Some("24h ago"));
    assert_eq!(fmt_since("2026-03-10T12:00:00Z", now).as_deref(), Some("5d ago"));
    assert_eq!(fmt_since("2026-01-01T00:00:00Z", now), None);
    assert_eq!(fmt_since("2026-03-16T00:00:00Z", now), None);
}

#[test]
fn unparseable_timestamps_pass_through() {
    assert_eq!(fmt_ts_ui("yesterday"), "yesterday");
    assert_eq!(fmt_ts_ui("2026-03-15T08:05:00Z"), "2026-03-15 08:05Z");
    let ctx = RenderCtx {
        now: at("2026-03-15T12:00:00Z"),
        ts_mode: TimestampMode::Relative,
    };
    assert_eq!(fmt_ts_list("2025-01-01T00:00:00Z", &ctx), "2025-01-01 00:00Z");
}
