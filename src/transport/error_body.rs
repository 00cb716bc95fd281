use serde_json::Value;

use crate::domain::{ErrorInfo, ErrorName};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Failure while reading a response body.
///
/// `message` is `None` when the underlying failure had nothing descriptive to say.
pub struct BodyReadError {
    pub message: Option<String>,
}

impl BodyReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn opaque() -> Self {
        Self { message: None }
    }
}

/// Classify the body of a non-success response.
///
/// JSON bodies are the service's own error and are passed through without
/// checking the tag. Anything else becomes an `application_error`.
pub fn decode_error_body(body: Result<&str, &BodyReadError>, status_text: &str) -> ErrorInfo {
    match body {
        Ok(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => remote_error(value),
            Err(_) => ErrorInfo::internal_server_error(),
        },
        Err(err) => ErrorInfo::application(
            err.message
                .clone()
                .unwrap_or_else(|| status_text.to_owned()),
        ),
    }
}

fn remote_error(value: Value) -> ErrorInfo {
    match value {
        Value::Object(mut map) => ErrorInfo {
            name: ErrorName::new(map.remove("name").map(into_text).unwrap_or_default()),
            message: map.remove("message").map(into_text).unwrap_or_default(),
        },
        other => ErrorInfo {
            name: ErrorName::new(String::new()),
            message: into_text(other),
        },
    }
}

fn into_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
