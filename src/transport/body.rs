use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::transport::case::{from_wire, to_wire};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Rewrite keys to snake_case before encoding.
    Wire,
    /// Encode the entity as-is.
    Raw,
}

/// Encode a request entity as JSON text.
///
/// Entities that serialize to `null` (`()`, `None`) produce no body.
pub fn encode_body<B>(entity: &B, case: KeyCase) -> Result<Option<String>, serde_json::Error>
where
    B: Serialize + ?Sized,
{
    let value = serde_json::to_value(entity)?;
    if value.is_null() {
        return Ok(None);
    }
    let value = match case {
        KeyCase::Wire => to_wire(value),
        KeyCase::Raw => value,
    };
    serde_json::to_string(&value).map(Some)
}

/// Decode a successful response body, camel-casing keys before typing it.
///
/// An empty body decodes as JSON `null`.
pub fn decode_success_body<T>(body: &str) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    let raw = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body)?
    };
    Ok(serde_json::from_value(from_wire(raw))?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{SendMessage, SendMessageResponse};

    use super::*;

    #[test]
    fn encode_wire_body_snake_cases_keys() {
        let msg = SendMessage::new("+16175555555", "Hello").media_url("https://x/y.png");
        let body = encode_body(&msg, KeyCase::Wire).unwrap().unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            parsed,
            json!({"to": "+16175555555", "message": "Hello", "media_url": "https://x/y.png"})
        );
    }

    #[test]
    fn encode_raw_body_keeps_keys() {
        let body = encode_body(&json!({"messageIds": ["a"]}), KeyCase::Raw)
            .unwrap()
            .unwrap();
        assert_eq!(body, r#"{"messageIds":["a"]}"#);
    }

    #[test]
    fn null_entities_produce_no_body() {
        assert_eq!(encode_body(&(), KeyCase::Wire).unwrap(), None);
        assert_eq!(encode_body(&None::<String>, KeyCase::Raw).unwrap(), None);
    }

    #[test]
    fn encode_reports_unserializable_entities() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(encode_body(&map, KeyCase::Wire).is_err());
    }

    #[test]
    fn decode_camel_cases_before_typing() {
        let resp: SendMessageResponse = decode_success_body(
            r#"{"id":"msg_123","status":"sent","sent_at":"2024-11-09T16:54:23.127072Z"}"#,
        )
        .unwrap();
        assert_eq!(resp.sent_at, "2024-11-09T16:54:23.127072Z");
    }

    #[test]
    fn decode_empty_body_as_null() {
        let value: Value = decode_success_body("  ").unwrap();
        assert_eq!(value, Value::Null);
        assert!(decode_success_body::<()>("").is_ok());
    }

    #[test]
    fn decode_rejects_invalid_json_and_wrong_shape() {
        assert!(matches!(
            decode_success_body::<Value>("{ not json }"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_success_body::<SendMessageResponse>(r#"{"id": 1}"#),
            Err(DecodeError::Json(_))
        ));
    }
}
