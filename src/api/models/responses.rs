use super::serde::null_as_default;
use crate::api::Snapshot;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotsBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub snapshots: Vec<Snapshot>,
}

/// Shape of the backend's failure responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
