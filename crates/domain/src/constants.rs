//! SDK constants
//!
//! Centralized location for endpoint paths, OAuth scopes and defaults used
//! throughout the SDK.

// Default endpoints
pub const DEFAULT_AUTH_BASE_URL: &str = "https://oidc.gateway-x.io";
pub const DEFAULT_API_BASE_URL: &str = "https://api.gateway-x.io";

// Environment variables
pub const ENV_CLIENT_ID: &str = "GLIDE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GLIDE_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "GLIDE_REDIRECT_URI";
pub const ENV_AUTH_BASE_URL: &str = "GLIDE_AUTH_BASE_URL";
pub const ENV_API_BASE_URL: &str = "GLIDE_API_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "GLIDE_LOG_LEVEL";
pub const ENV_REPORT_METRIC_URL: &str = "REPORT_METRIC_URL";

// OAuth endpoints (relative to the auth base URL)
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const BACKCHANNEL_AUTH_PATH: &str = "/oauth2/backchannel-authentication";
pub const AUTHORIZE_PATH: &str = "/oauth2/auth";

// OAuth grant types
pub const GRANT_CLIENT_CREDENTIALS: &str = "client_credentials";
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
pub const GRANT_CIBA: &str = "urn:openid:params:grant-type:ciba";

// Scopes
pub const SCOPE_SIM_SWAP: &str = "sim-swap";
pub const SCOPE_KYC_MATCH: &str = "kyc-match";
pub const SCOPE_MAGIC_AUTH: &str = "magic-auth";
pub const SCOPE_TELCO_FINDER: &str = "telco-finder";
pub const SCOPE_OPENID: &str = "openid";

/// Purpose string sent with number-verification authorization requests.
pub const NUMBER_VERIFY_PURPOSE: &str = "dpv:FraudPreventionAndDetection:number-verification";

// Domain endpoints (relative to the API base URL)
pub const NUMBER_VERIFY_PATH: &str = "/number-verification/verify";
pub const SIM_SWAP_CHECK_PATH: &str = "/sim-swap/check";
pub const SIM_SWAP_RETRIEVE_DATE_PATH: &str = "/sim-swap/retrieve-date";
pub const MAGIC_AUTH_START_PATH: &str = "/magic-auth/verification/start";
pub const MAGIC_AUTH_CHECK_PATH: &str = "/magic-auth/verification/check";
pub const MAGIC_AUTH_START_SERVER_AUTH_PATH: &str = "/magic-auth/verification/start-server-auth";
pub const MAGIC_AUTH_CHECK_SERVER_AUTH_PATH: &str = "/magic-auth/verification/check-server-auth";
pub const KYC_MATCH_PATH: &str = "/kyc-match/match";
pub const TELCO_FINDER_NETWORK_ID_PATH: &str = "/telco-finder/v1/resolve-network-id";
pub const TELCO_FINDER_SEARCH_PATH: &str = "/telco-finder/v1/search";

// Metrics API labels
pub const METRIC_API_NUMBER_VERIFY: &str = "number-verify";
pub const METRIC_API_MAGIC_AUTH: &str = "magic-auth";
pub const METRIC_API_KYC_MATCH: &str = "kyc-match";

/// Sessions expiring within this many seconds are treated as expired.
pub const SESSION_EXPIRY_MARGIN_SECS: i64 = 60;

/// Value substituted for KYC attributes the operator did not evaluate.
pub const KYC_NOT_AVAILABLE: &str = "not_available";
