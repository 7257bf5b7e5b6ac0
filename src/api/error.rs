use crate::api::Route;
use std::result;
use thiserror::Error;

pub type ApiResult<T> = result::Result<T, ApiError>;

/// Uniform failure of a backend call, whatever went wrong underneath.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{route} failed with status {status}{}", .message.as_ref().map(|msg| format!(": {}", msg)).unwrap_or_default())]
    Status {
        route: Route,
        status: u16,
        message: Option<String>,
    },

    #[error("{route} returned an unexpected response")]
    Decode {
        route: Route,
        #[source]
        source: serde_json::Error,
    },

    #[error("Couldn't reach the backend")]
    Transport(#[source] anyhow::Error),
}

impl ApiError {
    /// Error message provided by the server, if it sent any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
