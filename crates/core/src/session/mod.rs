//! Session lifecycle
//!
//! ```text
//! ┌──────────────────────┐
//! │ SessionManager<S>    │  cache + scope/expiry validation + polling
//! └──────────┬───────────┘
//!            │ acquire()
//!            ├──► ClientCredentialsStrategy  (magic auth, telco finder)
//!            ├──► AuthorizationCodeStrategy  (number verify)
//!            └──► CibaStrategy               (sim swap, kyc match)
//!                       │
//!                       └──► OAuthContext    (Basic auth form POSTs)
//! ```

pub mod authorization_code;
pub mod ciba;
pub mod client_credentials;
pub mod context;
pub mod manager;
pub mod strategy;

pub use authorization_code::AuthorizationCodeStrategy;
pub use ciba::{CibaStrategy, PendingAuthRequest};
pub use client_credentials::ClientCredentialsStrategy;
pub use context::OAuthContext;
pub use manager::SessionManager;
pub use strategy::SessionStrategy;
