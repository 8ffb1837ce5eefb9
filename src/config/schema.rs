//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every section defaults so that an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream collection endpoints.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// IP address to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub listen_port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.listen_port)
        } else {
            format!("{}:{}", self.host, self.listen_port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            listen_port: 8080,
        }
    }
}

/// Upstream endpoints for the three joined collections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub comments_url: String,
    pub posts_url: String,
    pub users_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            comments_url: "https://jsonplaceholder.typicode.com/comments".to_string(),
            posts_url: "https://jsonplaceholder.typicode.com/posts".to_string(),
            users_url: "https://jsonplaceholder.typicode.com/users".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one upstream fetch, body included, in seconds.
    pub fetch_secs: u64,

    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed to answer an inbound request in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            fetch_secs: 10,
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_endpoints() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.listen_port, 8080);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8080");
        assert_eq!(
            config.upstream.comments_url,
            "https://jsonplaceholder.typicode.com/comments"
        );
        assert_eq!(config.upstream.posts_url, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.upstream.users_url, "https://jsonplaceholder.typicode.com/users");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            listen_port = 3000

            [upstream]
            posts_url = "http://localhost:9000/posts"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.listen_port, 3000);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.upstream.posts_url, "http://localhost:9000/posts");
        assert_eq!(config.upstream.users_url, UpstreamConfig::default().users_url);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.timeouts, TimeoutConfig::default());
    }

    #[test]
    fn test_ipv6_bind_address() {
        let listener = ListenerConfig { host: "::1".to_string(), listen_port: 80 };
        assert_eq!(listener.bind_address(), "[::1]:80");
    }
}
