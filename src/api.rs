mod error;
mod models;
mod route;

pub use self::{error::*, models::*, route::*};

use crate::http::{HttpRequest, Transport};
use crate::identity::AuthToken;
use serde::de::DeserializeOwned;

/// Client of the snapshot-management backend.
///
/// Every call goes through [`Backend::call()`], which attaches the bearer
/// token and turns whatever went wrong into an [`ApiError`] - so callers
/// never have to dig through raw responses.
pub struct Backend<'a> {
    url: &'a str,
    transport: &'a mut dyn Transport,
}

impl<'a> Backend<'a> {
    pub fn new(url: &'a str, transport: &'a mut dyn Transport) -> Self {
        Self { url, transport }
    }

    /// Starts the backend's own device-code login; returns the instructions
    /// for the user.
    pub fn login(&mut self) -> ApiResult<String> {
        let body = self.call(Route::Login, None, None, None)?;
        let body: MessageBody = Self::decode(Route::Login, &body)?;

        Ok(body.message)
    }

    pub fn health(&mut self) -> ApiResult<String> {
        let body = self.call(Route::Health, None, None, None)?;
        let body: StatusBody = Self::decode(Route::Health, &body)?;

        Ok(body.status)
    }

    pub fn create_snapshot(&mut self, token: &AuthToken, request: &SnapshotRequest) -> ApiResult<()> {
        let body = Self::encode(request);

        self.call(Route::CreateSnapshot, Some(token), None, Some(body))?;

        Ok(())
    }

    pub fn delete_snapshot(&mut self, token: &AuthToken, request: &SnapshotRequest) -> ApiResult<()> {
        let body = Self::encode(request);

        self.call(Route::DeleteSnapshot, Some(token), None, Some(body))?;

        Ok(())
    }

    /// Returns the backend's verdict, e.g. `Snapshot is valid and exists.`
    pub fn validate_snapshot(
        &mut self,
        token: &AuthToken,
        request: &SnapshotRequest,
    ) -> ApiResult<String> {
        let body = Self::encode(request);
        let body = self.call(Route::ValidateSnapshot, Some(token), None, Some(body))?;
        let body: MessageBody = Self::decode(Route::ValidateSnapshot, &body)?;

        Ok(body.message)
    }

    /// Returns snapshots older than given number of days.
    pub fn snapshots_by_age(&mut self, token: &AuthToken, days: u32) -> ApiResult<Vec<Snapshot>> {
        let query = format!("days={}", days);
        let body = self.call(Route::SnapshotsByAge, Some(token), Some(query), None)?;
        let body: SnapshotsBody = Self::decode(Route::SnapshotsByAge, &body)?;

        Ok(body.snapshots)
    }

    fn call(
        &mut self,
        route: Route,
        token: Option<&AuthToken>,
        query: Option<String>,
        body: Option<String>,
    ) -> ApiResult<String> {
        let mut url = format!("{}{}", self.url.trim_end_matches('/'), route.path());

        if let Some(query) = query {
            url.push('?');
            url.push_str(&query);
        }

        let mut request = HttpRequest::new(route.method(), url);

        if let Some(token) = token {
            request = request.with_header("Authorization", token.bearer());
        } else if route.is_protected() {
            log::warn!("Calling {} without a bearer token", route);
        }

        if let Some(body) = body {
            request = request.with_json(body);
        }

        log::info!("{}", route);

        let response = self.transport.send(request).map_err(ApiError::Transport)?;

        if response.is_success() {
            return Ok(response.body);
        }

        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.error);

        log::warn!("{} failed with status {}", route, response.status);

        Err(ApiError::Status {
            route,
            status: response.status,
            message,
        })
    }

    fn encode(request: &SnapshotRequest) -> String {
        // Serializing a struct of plain strings can't fail
        serde_json::to_string(request).unwrap_or_default()
    }

    fn decode<T>(route: Route, body: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|source| ApiError::Decode { route, source })
    }
}
