//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Upstream URLs are absolute http(s) URLs
//! - Timeouts are non-zero, addresses parse
//! - request_secs exceeds fetch_secs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("{field}: must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("timeouts.request_secs: {request_secs} must exceed timeouts.fetch_secs ({fetch_secs})")]
    RequestTimeoutTooShort { request_secs: u64, fetch_secs: u64 },

    #[error("listener.host: '{0}' is not an IP address")]
    InvalidHost(String),

    #[error("observability.metrics_address: '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let upstream = &config.upstream;
    for (field, value) in [
        ("upstream.comments_url", &upstream.comments_url),
        ("upstream.posts_url", &upstream.posts_url),
        ("upstream.users_url", &upstream.users_url),
    ] {
        if let Err(e) = validate_url(field, value) {
            errors.push(e);
        }
    }

    let timeouts = &config.timeouts;
    for (field, value) in [
        ("timeouts.fetch_secs", timeouts.fetch_secs),
        ("timeouts.connect_secs", timeouts.connect_secs),
        ("timeouts.request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout { field });
        }
    }

    // Fetch timeouts expire before the inbound request deadline.
    if timeouts.fetch_secs > 0
        && timeouts.request_secs > 0
        && timeouts.request_secs <= timeouts.fetch_secs
    {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            fetch_secs: timeouts.fetch_secs,
        });
    }

    if config.listener.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|e| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ValidationError::UnsupportedScheme {
            field,
            scheme: scheme.to_string(),
        }),
    }
}
