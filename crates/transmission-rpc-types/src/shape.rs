//! Response envelopes and shape validation.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

/// `result` value of every successful method call.
pub const RESULT_SUCCESS: &str = "success";

/// `result` value Transmission answers to a request without a method name.
pub const RESULT_NO_METHOD_NAME: &str = "no method name";

/// The `arguments` shape expected for a given method response.
pub trait Shape: DeserializeOwned {
    /// The literal the envelope's `result` field must carry.
    const RESULT: &'static str = RESULT_SUCCESS;
}

/// A validated response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<A> {
    /// Outcome string reported by the daemon.
    pub result: String,
    /// Method-specific payload.
    pub arguments: A,
}

/// The list of mismatches found while validating a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("response does not match the expected shape: {}", .mismatches.join("; "))]
pub struct ValidationError {
    /// One entry per mismatch, prefixed with the offending path.
    pub mismatches: Vec<String>,
}

impl ValidationError {
    /// Creates a validation error from a list of mismatches.
    pub fn new(mismatches: Vec<String>) -> Self {
        Self { mismatches }
    }
}

/// Validates a decoded response against the shape `S`.
///
/// The envelope must be an object whose `result` equals [`Shape::RESULT`] and whose `arguments`
/// deserialize into `S`. Every mismatch found is reported; the value is never repaired.
pub fn validate<S: Shape>(value: Value) -> Result<Response<S>, ValidationError> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(ValidationError::new(vec![format!(
                "expected an object, got {}",
                kind(&other)
            )]));
        }
    };

    let mut mismatches = Vec::new();

    let result = match object.remove("result") {
        Some(Value::String(result)) if result == S::RESULT => Some(result),
        Some(Value::String(result)) => {
            mismatches.push(format!("result: expected {:?}, got {result:?}", S::RESULT));
            None
        }
        Some(other) => {
            mismatches.push(format!("result: expected a string, got {}", kind(&other)));
            None
        }
        None => {
            mismatches.push("result: required".to_string());
            None
        }
    };

    let arguments = match object.remove("arguments") {
        Some(arguments) => match serde_json::from_value::<S>(arguments) {
            Ok(arguments) => Some(arguments),
            Err(e) => {
                mismatches.push(format!("arguments: {e}"));
                None
            }
        },
        None => {
            mismatches.push("arguments: required".to_string());
            None
        }
    };

    match (result, arguments) {
        (Some(result), Some(arguments)) => Ok(Response { result, arguments }),
        _ => Err(ValidationError::new(mismatches)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Arguments of the response to a bare ping, which carries no method name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingArguments {}

impl Shape for PingArguments {
    const RESULT: &'static str = RESULT_NO_METHOD_NAME;
}

/// Arguments of methods that only acknowledge the call (`torrent-remove`, `torrent-start`, ...).
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {}

impl Shape for Acknowledged {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ping_shape_accepts_no_method_name() {
        let response =
            validate::<PingArguments>(json!({ "result": "no method name", "arguments": {} }))
                .unwrap();
        assert_eq!(response.result, RESULT_NO_METHOD_NAME);
    }

    #[test]
    fn ping_shape_rejects_other_results() {
        let err = validate::<PingArguments>(json!({
            "result": "something unexpected",
            "arguments": {}
        }))
        .unwrap_err();
        assert_eq!(
            err.mismatches,
            vec![r#"result: expected "no method name", got "something unexpected""#]
        );
    }

    #[test]
    fn collects_every_mismatch() {
        let err = validate::<Acknowledged>(json!({ "result": 7 })).unwrap_err();
        assert_eq!(
            err.mismatches,
            vec![
                "result: expected a string, got a number".to_string(),
                "arguments: required".to_string(),
            ]
        );
        assert!(err.to_string().contains("arguments: required"));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = validate::<Acknowledged>(json!(["success"])).unwrap_err();
        assert_eq!(err.mismatches, vec!["expected an object, got an array"]);
    }

    #[test]
    fn acknowledged_ignores_extra_arguments() {
        let response =
            validate::<Acknowledged>(json!({ "result": "success", "arguments": { "x": 1 } }))
                .unwrap();
        assert_eq!(response.arguments, Acknowledged {});
    }

    #[test]
    fn acknowledged_rejects_non_object_arguments() {
        let err = validate::<Acknowledged>(json!({ "result": "success", "arguments": null }))
            .unwrap_err();
        assert_eq!(err.mismatches.len(), 1);
        assert!(err.mismatches[0].starts_with("arguments: "));
    }
}
