//! End-user identity used to scope backchannel sessions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::normalize_phone_number;

/// The end user a per-user client acts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserIdentifier {
    #[serde(rename = "phoneNumber")]
    Phone(String),
    #[serde(rename = "ipAddress")]
    Ip(String),
    UserId(String),
}

impl UserIdentifier {
    pub fn phone(number: impl Into<String>) -> Self {
        Self::Phone(number.into())
    }

    pub fn ip(address: impl Into<String>) -> Self {
        Self::Ip(address.into())
    }

    pub fn user_id(id: impl Into<String>) -> Self {
        Self::UserId(id.into())
    }

    /// CIBA `login_hint` for this identity: `tel:<e164>` for phones,
    /// `ipport:<address>` for IPs, nothing for opaque user ids.
    #[must_use]
    pub fn login_hint(&self) -> Option<String> {
        match self {
            Self::Phone(number) => Some(format!("tel:{}", normalize_phone_number(number))),
            Self::Ip(address) => Some(format!("ipport:{address}")),
            Self::UserId(_) => None,
        }
    }

    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        match self {
            Self::Phone(number) => Some(number),
            Self::Ip(_) | Self::UserId(_) => None,
        }
    }
}

impl fmt::Display for UserIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone(number) => write!(f, "phone {number}"),
            Self::Ip(address) => write!(f, "ip {address}"),
            Self::UserId(id) => write!(f, "user {id}"),
        }
    }
}
