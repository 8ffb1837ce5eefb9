//! Aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! GET /combinedData
//!     → service.rs (Aggregator, one call per request)
//!     → fetcher.rs x3, concurrently (comments, posts, users → untyped records)
//!     → joiner.rs (coerce into records.rs types, join by id)
//!     → Vec<CombinedRecord> → JSON
//! ```
//!
//! # Design Decisions
//! - Everything is request-scoped; nothing is cached between requests
//! - Any fetch or schema error aborts the whole request
//! - Missing cross-references are data policy, not errors

pub mod fetcher;
pub mod joiner;
pub mod records;
pub mod service;
pub mod types;

pub use fetcher::Fetcher;
pub use joiner::join;
pub use records::{Comment, CombinedRecord, Post, User};
pub use service::Aggregator;
pub use types::{AggregationError, AggregationResult, Collection, Record, SchemaError};
