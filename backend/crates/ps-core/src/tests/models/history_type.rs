use crate::HistoryType;

use googletest::prelude::*;

#[test]
fn given_known_log_types_when_classified_then_ids_match_stored_format() {
    let cases = [
        ("log", 1),
        ("error", 2),
        ("warning", 3),
        ("info", 4),
        ("ai_request", 5),
        ("ai_response", 6),
        ("debug", 7),
        ("activity", 8),
        ("session_metadata", 9),
    ];

    for (log_type, id) in cases {
        assert_that!(HistoryType::from_log_type(log_type).id(), eq(id));
    }
}

#[test]
fn given_unrecognized_log_type_when_classified_then_plain_log() {
    assert_that!(HistoryType::from_log_type("telemetry"), eq(HistoryType::Log));
    assert_that!(HistoryType::from_log_type(""), eq(HistoryType::Log));
}

#[test]
fn given_ids_when_labelled_then_unknown_outside_range() {
    assert_that!(HistoryType::label_for_id(5), eq("AI Request"));
    assert_that!(HistoryType::label_for_id(9), eq("Session Metadata"));
    assert_that!(HistoryType::label_for_id(0), eq("Unknown"));
    assert_that!(HistoryType::label_for_id(42), eq("Unknown"));
}

#[test]
fn given_history_type_when_serialized_then_written_as_integer() {
    let json = serde_json::to_string(&HistoryType::AiResponse).unwrap();
    assert_that!(json.as_str(), eq("6"));

    let back: HistoryType = serde_json::from_str("8").unwrap();
    assert_that!(back, eq(HistoryType::Activity));
    assert_that!(serde_json::from_str::<HistoryType>("10"), err(anything()));
}

#[test]
fn given_stored_ids_when_converted_then_unknown_ids_rejected() {
    // Given
    let known = HistoryType::try_from(2_i64);
    let unknown = HistoryType::try_from(42_i64);

    // Then
    assert_that!(known, ok(eq(&HistoryType::Error)));
    assert_that!(unknown, err(eq("unknown history type id 42")));
    assert_that!(i64::from(HistoryType::Debug), eq(7));
}
