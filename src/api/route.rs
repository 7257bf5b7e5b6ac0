use crate::http::HttpMethod;
use std::fmt;

/// Backend endpoints; each has a fixed method and path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Health,
    CreateSnapshot,
    DeleteSnapshot,
    ValidateSnapshot,
    SnapshotsByAge,
}

impl Route {
    pub fn method(self) -> HttpMethod {
        match self {
            Route::Login | Route::Health | Route::SnapshotsByAge => HttpMethod::Get,
            Route::CreateSnapshot | Route::ValidateSnapshot => HttpMethod::Post,
            Route::DeleteSnapshot => HttpMethod::Delete,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Health => "/health",
            Route::CreateSnapshot => "/create-snapshot",
            Route::DeleteSnapshot => "/api/delete-snapshot",
            Route::ValidateSnapshot => "/api/validate-snapshot",
            Route::SnapshotsByAge => "/api/get-snapshots-by-age",
        }
    }

    /// Whether the backend expects a bearer token on this route.
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login | Route::Health)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
