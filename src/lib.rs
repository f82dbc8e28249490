//! Small HTTP service for text transformations.
//!
//! Two GET endpoints, both stateless:
//!
//! ```text
//! GET /uppercase?text=hello                                  -> {"text": "HELLO"}
//! GET /generate?message=Hi&duplication_factor=2&capitalization=UPPER
//!                                                            -> {"generated_text": "HIHI"}
//! ```
//!
//! The OpenAPI document is served at `/apispec_1.json` with a Swagger UI at
//! `/apidocs`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`transform`]: Pure text transformations
//! - [`api`]: HTTP routes, handlers and documentation
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod transform;
pub mod utils;

pub use config::Config;
pub use error::{RequestError, Result, ServiceError};
