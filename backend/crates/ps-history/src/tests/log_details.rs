use crate::log_details::{LogDetails, OUTPUT_ENCODE_THRESHOLD, decode_details};

use ps_core::{HistoryLog, HistoryType};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use googletest::prelude::*;
use serde_json::{Map, Value, json};

fn stored(details: &Value) -> HistoryLog {
    HistoryLog {
        id: 1,
        history_id: 1,
        log_type: "ai_response".to_string(),
        history_type_id: HistoryType::AiResponse.id(),
        timestamp: Utc::now(),
        details: details.to_string(),
    }
}

#[test]
fn given_output_over_threshold_when_built_then_base64_with_flag() {
    // Given
    let output = "é".repeat(OUTPUT_ENCODE_THRESHOLD / 2 + 1);

    // When
    let details = LogDetails::new("done", None, Some(json!(output)), Map::new());

    // Then
    assert_that!(details.output_encoded, some(eq(true)));
    assert_that!(
        details.output,
        some(eq(&json!(STANDARD.encode(output.as_bytes()))))
    );
}

#[test]
fn given_output_at_threshold_when_built_then_stored_raw() {
    let output = "a".repeat(OUTPUT_ENCODE_THRESHOLD);

    let details = LogDetails::new("done", None, Some(json!(output)), Map::new());

    assert_that!(details.output_encoded, none());
    assert_that!(details.output, some(eq(&json!(output))));
}

#[test]
fn given_scalar_input_and_output_when_built_then_wrapped_in_value() {
    let details = LogDetails::new("n", Some(json!(7)), Some(json!(true)), Map::new());

    assert_that!(details.input, some(eq(&json!({ "value": 7 }))));
    assert_that!(details.output, some(eq(&json!({ "value": true }))));
}

#[test]
fn given_empty_context_when_serialized_then_optional_keys_absent() {
    let details = LogDetails::new("plain", None, None, Map::new());

    let value = serde_json::to_value(&details).unwrap();

    assert_that!(value.get("context"), none());
    assert_that!(value.get("input"), none());
    assert_that!(value.get("output_encoded"), none());
    assert_that!(value["message"], eq(&json!("plain")));
}

#[test]
fn given_encoded_output_when_decoded_then_original_restored_and_flag_removed() {
    // Given
    let output = format!("<p>{}</p>\n", "long body ".repeat(80));
    let details = LogDetails::new("resp", None, Some(json!(output)), Map::new());
    let log = stored(&serde_json::to_value(&details).unwrap());

    // When
    let decoded = decode_details(&log);

    // Then
    assert_that!(decoded["output"].as_str().map(str::to_string), some(eq(output.as_str())));
    assert_that!(decoded.get("output_encoded"), none());
}

#[test]
fn given_invalid_base64_when_decoded_then_original_kept_and_error_flagged() {
    let log = stored(&json!({ "message": "m", "output": "***", "output_encoded": true }));

    let decoded = decode_details(&log);

    assert_that!(decoded["output"], eq(&json!("***")));
    assert_that!(decoded["output_decode_error"], eq(&json!(true)));
}

#[test]
fn given_malformed_details_when_decoded_then_decode_error_record() {
    let mut log = stored(&json!({}));
    log.details = "{oops".to_string();

    let decoded = decode_details(&log);

    assert_that!(decoded["decode_error"], eq(&json!(true)));
    assert_that!(decoded["raw"], eq(&json!("{oops")));
}
