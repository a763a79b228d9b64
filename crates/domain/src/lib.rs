//! # Glide Domain
//!
//! Business domain types for the Glide SDK.
//!
//! This crate contains:
//! - Settings, sessions and end-user identifiers
//! - Request/response shapes for every Glide API
//! - Domain error types and Result definitions
//! - Endpoint and scope constants
//!
//! ## Architecture
//! - No dependencies on other Glide crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
pub use utils::normalize_phone_number;
