use captionify::domain::{CaptionSegment, CaptionTimingError};

#[test]
fn given_valid_timing_when_constructing_then_segment_is_created() {
    let segment = CaptionSegment::new(0.0, 2.5, "hello world").unwrap();

    assert_eq!(segment.start, 0.0);
    assert_eq!(segment.end, 2.5);
    assert_eq!(segment.text, "hello world");
    assert_eq!(segment.duration(), 2.5);
}

#[test]
fn given_negative_start_when_constructing_then_returns_error() {
    let result = CaptionSegment::new(-0.5, 1.0, "bad");

    assert!(matches!(result, Err(CaptionTimingError::NegativeStart(_))));
}

#[test]
fn given_end_at_or_before_start_when_constructing_then_returns_error() {
    assert!(matches!(
        CaptionSegment::new(2.0, 2.0, "zero length"),
        Err(CaptionTimingError::EndBeforeStart { .. })
    ));
    assert!(matches!(
        CaptionSegment::new(2.0, 1.0, "backwards"),
        Err(CaptionTimingError::EndBeforeStart { .. })
    ));
}

#[test]
fn given_millisecond_timestamps_when_converting_then_offsets_are_seconds() {
    let segment = CaptionSegment::from_millis(1500, 3200, "provider uses ms").unwrap();

    assert_eq!(segment.start, 1.5);
    assert_eq!(segment.end, 3.2);
}

#[test]
fn given_wire_segment_when_validating_then_invariant_is_enforced() {
    let good = CaptionSegment {
        start: 0.5,
        end: 1.0,
        text: "ok".to_string(),
    };
    let bad = CaptionSegment {
        start: 1.0,
        end: 0.5,
        text: "backwards".to_string(),
    };

    assert!(good.validate().is_ok());
    assert!(bad.validate().is_err());
}

#[test]
fn given_segment_when_serialized_then_field_names_match_the_wire_format() {
    let segment = CaptionSegment::new(0.0, 1.0, "hi").unwrap();

    let json = serde_json::to_value(&segment).unwrap();

    assert_eq!(json["start"], 0.0);
    assert_eq!(json["end"], 1.0);
    assert_eq!(json["text"], "hi");
}
