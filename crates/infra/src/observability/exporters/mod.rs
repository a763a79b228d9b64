//! Metric exporters.

pub mod http_reporter;

pub use http_reporter::HttpMetricsReporter;
