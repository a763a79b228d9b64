//! Testing utilities and helpers
//!
//! - **[`time`]**: controllable clock for expiry tests
//! - **[`tokens`]**: unsigned JWT builder for claims tests

pub mod time;
pub mod tokens;

pub use time::MockClock;
pub use tokens::{token_with_operator, unsigned_jwt};
