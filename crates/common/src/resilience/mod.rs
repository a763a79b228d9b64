//! Resilience patterns
//!
//! Backoff strategies shared by the metrics reporter's retry loop and the
//! session poller, plus the bounded [`PollConfig`].

pub mod backoff;
pub mod poll;

pub use backoff::BackoffStrategy;
pub use poll::{PollConfig, PollConfigBuilder, PollConfigError};
