//! Glide service clients
//!
//! Root clients are cheap to clone or hold; per-user clients own their
//! session and are created through `for_user`, which starts the session
//! eagerly.

pub mod context;
pub mod kyc_match;
pub mod magic_auth;
pub mod number_verify;
pub mod sim_swap;
pub mod telco_finder;

pub use context::ServiceContext;
pub use kyc_match::{KycMatchClient, KycMatchUserClient};
pub use magic_auth::MagicAuthClient;
pub use number_verify::{NumberVerifyClient, NumberVerifyUserClient};
pub use sim_swap::{SimSwapClient, SimSwapUserClient};
pub use telco_finder::TelcoFinderClient;
