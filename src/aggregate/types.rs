//! Shared aggregation types and error definitions.

use std::fmt;

use thiserror::Error;

/// One JSON object from an upstream collection, fields not yet coerced.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The three upstream collections joined by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Comments,
    Posts,
    Users,
}

impl Collection {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Comments => "comments",
            Collection::Posts => "posts",
            Collection::Users => "users",
        }
    }

    /// Singular noun for a record of this collection.
    pub fn record_name(self) -> &'static str {
        match self {
            Collection::Comments => "comment",
            Collection::Posts => "post",
            Collection::Users => "user",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded record is missing a required field or has one of the wrong type.
#[derive(Debug, Error)]
#[error("invalid {} record at index {index}: {source}", .collection.record_name())]
pub struct SchemaError {
    pub collection: Collection,
    pub index: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Errors that abort a combined-data request.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// The GET could not complete: network failure, timeout or non-2xx status.
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not a JSON array of objects.
    #[error("decode error for {url}: {reason}")]
    Decode { url: String, reason: String },

    /// A record did not match its strict schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl AggregationError {
    /// Stable label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AggregationError::Transport { .. } => "transport",
            AggregationError::Decode { .. } => "decode",
            AggregationError::Schema(_) => "schema",
        }
    }
}

/// Result type for aggregation operations.
pub type AggregationResult<T> = Result<T, AggregationError>;
