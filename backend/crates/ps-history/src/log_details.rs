//! The JSON payload stored with every log entry.
//!
//! Large string outputs are stored base64-encoded with `output_encoded`
//! set; [`decode_details`] reverses that for readers.

use ps_core::{DETAIL_TIMESTAMP_FORMAT, HistoryLog};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Outputs whose byte length exceeds this are stored base64-encoded.
pub const OUTPUT_ENCODE_THRESHOLD: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogDetails {
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_encoded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl LogDetails {
    pub fn new(
        message: &str,
        input: Option<Value>,
        output: Option<Value>,
        context: Map<String, Value>,
    ) -> Self {
        let mut details = Self {
            message: message.to_string(),
            timestamp: Utc::now().format(DETAIL_TIMESTAMP_FORMAT).to_string(),
            input: input.filter(|v| !v.is_null()).map(wrap_scalar),
            output: None,
            output_encoded: None,
            context: Some(context).filter(|c| !c.is_empty()),
        };

        match output {
            None | Some(Value::Null) => {}
            Some(Value::String(text)) if text.len() > OUTPUT_ENCODE_THRESHOLD => {
                details.output = Some(Value::String(STANDARD.encode(text.as_bytes())));
                details.output_encoded = Some(true);
            }
            Some(value @ Value::String(_)) => details.output = Some(value),
            Some(value) => details.output = Some(wrap_scalar(value)),
        }

        details
    }
}

/// Objects and arrays are kept; other values become `{"value": ...}`.
fn wrap_scalar(value: Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => value,
        other => json!({ "value": other }),
    }
}

/// Decode a stored details payload for presentation.
///
/// Malformed JSON is replaced by a record describing the failure. When
/// `output_encoded` is set the output is decoded back to text and the flag
/// removed; if decoding fails the stored output is kept and
/// `output_decode_error` is set instead.
pub fn decode_details(log: &HistoryLog) -> Value {
    let mut details = match log.parse_details() {
        Ok(value) => value,
        Err(e) => {
            return json!({
                "decode_error": true,
                "error": e.to_string(),
                "raw": log.details,
            });
        }
    };

    if let Value::Object(map) = &mut details {
        let encoded = map
            .get("output_encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if encoded {
            match map.get("output").and_then(Value::as_str).map(decode_output) {
                Some(Some(text)) => {
                    map.insert("output".to_string(), Value::String(text));
                    map.remove("output_encoded");
                }
                _ => {
                    map.insert("output_decode_error".to_string(), Value::Bool(true));
                }
            }
        }
    }

    details
}

fn decode_output(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}
