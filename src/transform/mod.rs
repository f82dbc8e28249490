//! Pure text transformations behind the HTTP endpoints.
//!
//! This module handles:
//! - Uppercasing arbitrary text
//! - Case conversion followed by duplication
//! - Output size prediction for request limits

pub mod capitalization;
pub mod generator;

pub use capitalization::Capitalization;
pub use generator::{generate, generated_len, uppercase};
