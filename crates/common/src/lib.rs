//! Modular common utilities shared across Glide SDK crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: OAuth helpers, claims reader, backoff/poll policy, clock
//! - `test-utils`: mock clock and token fixtures for tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod auth;
#[cfg(feature = "foundation")]
pub mod resilience;
#[cfg(feature = "foundation")]
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use auth::{basic_auth_header, bearer_auth_header, encode_form, read_operator, ClaimsError};
#[cfg(feature = "foundation")]
pub use resilience::{BackoffStrategy, PollConfig};
#[cfg(feature = "foundation")]
pub use time::{Clock, SystemClock};
