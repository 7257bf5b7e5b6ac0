use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;

/// Short-lived bearer credential; its value never shows up in `Debug`.
pub struct AuthToken(SecretString);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

/// Answer of the provider's device-code endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeviceCode {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub expires_in: u64,

    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Human-readable instructions, already containing the user code
    pub message: String,
}

fn default_interval() -> u64 {
    5
}

/// Answer of the provider's token endpoint, for all the grants we use.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    pub expires_in: i64,

    #[serde(default)]
    pub id_token: Option<String>,
}

impl TokenGrant {
    /// Extracts the account name out of the (unverified) ID token - good
    /// enough for display purposes, never used for authorization.
    pub fn account(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct Claims {
            preferred_username: Option<String>,
            name: Option<String>,
        }

        let payload = self.id_token.as_ref()?.split('.').nth(1)?;
        let payload = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let claims: Claims = serde_json::from_slice(&payload).ok()?;

        claims.preferred_username.or(claims.name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub error: String,

    #[serde(default)]
    pub error_description: String,
}
