use std::result;
use thiserror::Error;

pub type IdentityResult<T> = result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Interaction required: {0}")]
    InteractionRequired(String),

    #[error("Identity provider is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("Identity provider refused the request: {code} ({description})")]
    Provider { code: String, description: String },

    #[cfg(test)]
    #[error("InjectedError")]
    InjectedError,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IdentityError {
    pub fn provider_code(&self) -> Option<&str> {
        if let IdentityError::Provider { code, .. } = self {
            Some(code)
        } else {
            None
        }
    }
}
