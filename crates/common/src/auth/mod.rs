//! OAuth 2.0 client helpers
//!
//! Building blocks shared by every session strategy:
//!
//! - **Basic/Bearer headers**: client authentication and resource access
//! - **Form encoding**: ordered `x-www-form-urlencoded` bodies and queries
//! - **Claims**: unverified JWT payload reader (`ext.operator`)

pub mod basic;
pub mod claims;
pub mod form;

pub use basic::{basic_auth_header, bearer_auth_header};
pub use claims::{decode_payload, read_operator, ClaimsError};
pub use form::{decode_form, encode_form};
