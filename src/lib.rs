//! Combined-data service library.
//!
//! Fetches comments, posts and users from upstream JSON endpoints, joins
//! them per comment, and serves the result over HTTP.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use aggregate::{join, Aggregator, CombinedRecord};
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
