//! # Glide Core
//!
//! Session management and service clients for the Glide telecom APIs.
//!
//! This crate contains:
//! - Port interfaces (traits) for HTTP transport and metrics delivery
//! - OAuth session strategies and the per-client session cache
//! - The number verify, SIM swap, magic auth, KYC match and telco finder
//!   clients
//!
//! ## Architecture Principles
//! - Depends only on `glide-domain` and `glide-common`
//! - No HTTP client code; adapters live in `glide-infra`
//! - All external I/O via traits

pub mod metrics_ports;
pub mod services;
pub mod session;
pub mod transport_ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use metrics_ports::{MetricsSink, MetricsTasks, NoopMetricsSink};
pub use services::{
    KycMatchClient, KycMatchUserClient, MagicAuthClient, NumberVerifyClient, NumberVerifyUserClient,
    ServiceContext, SimSwapClient, SimSwapUserClient, TelcoFinderClient,
};
pub use session::{
    AuthorizationCodeStrategy, CibaStrategy, ClientCredentialsStrategy, OAuthContext, PendingAuthRequest,
    SessionManager, SessionStrategy,
};
pub use transport_ports::{HttpMethod, HttpRequest, HttpResponse, Transport};
