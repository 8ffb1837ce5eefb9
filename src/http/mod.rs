//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate X-Request-ID)
//!     → /combinedData → aggregate::Aggregator → JSON or 500 text
//!     → /health → health.rs
//! ```

pub mod health;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
