//! Upstream collection fetcher.
//!
//! # Responsibilities
//! - GET a collection URL with bounded connect and total timeouts
//! - Treat any non-2xx status as a transport failure
//! - Decode the body into a sequence of untyped JSON objects

use std::time::Duration;

use serde_json::Value;

use crate::aggregate::types::{AggregationError, AggregationResult, Record};

/// HTTP client for upstream collections. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Create a fetcher whose requests fail after `timeout` in total.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url` and decode it as a JSON array of objects.
    pub async fn fetch(&self, url: &str) -> AggregationResult<Vec<Record>> {
        let transport = |source: reqwest::Error| AggregationError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(transport)?;

        let body = response.bytes().await.map_err(transport)?;
        decode_records(&body).map_err(|reason| AggregationError::Decode {
            url: url.to_string(),
            reason,
        })
    }
}

fn decode_records(body: &[u8]) -> Result<Vec<Record>, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| format!("invalid JSON: {e}"))?;

    let Value::Array(items) = value else {
        return Err(format!("expected a JSON array, found {}", json_type(&value)));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(format!(
                "element {index} is {}, expected an object",
                json_type(&other)
            )),
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_array_of_objects() {
        let records = decode_records(br#"[{"id": 1}, {"id": 2, "extra": [true]}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["id"], 2);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_records(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode_records(b"[{\"id\": 1,").unwrap_err();
        assert!(err.starts_with("invalid JSON"), "{err}");
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_records(br#"{"id": 1}"#).unwrap_err();
        assert_eq!(err, "expected a JSON array, found an object");
    }

    #[test]
    fn test_decode_rejects_non_object_elements() {
        let err = decode_records(br#"[{"id": 1}, 2]"#).unwrap_err();
        assert_eq!(err, "element 1 is a number, expected an object");
    }
}
