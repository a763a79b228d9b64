//! # Glide Infrastructure
//!
//! Infrastructure implementations of the `glide-core` ports, plus the
//! [`GlideClient`] facade.
//!
//! This crate contains:
//! - reqwest-backed HTTP transport
//! - HTTP usage-metrics reporter
//! - Environment and file settings loader
//! - `tracing` subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `glide-core`
//! - Contains all "impure" code (network, environment, files)

pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use client::GlideClient;
pub use config::{load_settings_from_env, load_settings_from_file, load_settings_with};
pub use errors::InfraError;
pub use http::{HttpTransport, HttpTransportBuilder};
pub use observability::{env_filter, init_tracing, HttpMetricsReporter};
