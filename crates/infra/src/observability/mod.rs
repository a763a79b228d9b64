//! Observability infrastructure: usage-metric delivery and log setup.
//!
//! ## Components
//! - [`exporters::HttpMetricsReporter`]: [`glide_core::MetricsSink`] that
//!   POSTs events to the configured metrics endpoint
//! - [`logging`]: `tracing-subscriber` initialisation driven by
//!   [`glide_domain::LogLevel`]

pub mod exporters;
pub mod logging;

pub use exporters::HttpMetricsReporter;
pub use logging::{env_filter, init_tracing};
