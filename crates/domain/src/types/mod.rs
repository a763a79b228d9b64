//! Domain types and models
//!
//! Settings, sessions and identities shared by every service, plus the
//! request/response shapes of each Glide API.

pub mod identifier;
pub mod kyc_match;
pub mod magic_auth;
pub mod metric;
pub mod number_verify;
pub mod session;
pub mod settings;
pub mod sim_swap;
pub mod telco_finder;

pub use identifier::UserIdentifier;
pub use kyc_match::{KycMatchProps, KycMatchResponse};
pub use magic_auth::{
    FallbackChannel, MagicAuthCheckResponse, MagicAuthCheckServerAuthResponse,
    MagicAuthStartProps, MagicAuthStartResponse, MagicAuthStartServerAuthProps,
    MagicAuthStartServerAuthResponse, MagicAuthVerifyProps, ServerAuthStatus,
};
pub use metric::{MetricEvent, MetricReport};
pub use number_verify::{NumberVerifyAuthUrlInput, NumberVerifyClientForParams, NumberVerifyResponse};
pub use session::{ApiConfig, Session, TokenResponse};
pub use settings::{InternalSettings, LogLevel, Settings};
pub use sim_swap::{
    SimSwapCheckParams, SimSwapCheckResponse, SimSwapRetrieveDateParams,
    SimSwapRetrieveDateResponse,
};
pub use telco_finder::{
    TelcoFinderLink, TelcoFinderNetworkIdResponse, TelcoFinderProperties,
    TelcoFinderSearchResponse,
};
