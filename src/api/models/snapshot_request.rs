use serde::Serialize;

/// Body of the create, delete and validate calls.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequest {
    pub resource_group_name: String,
    pub snapshot_name: String,
    pub disk_id: Option<String>,
    pub location: Option<String>,
}

impl SnapshotRequest {
    pub fn new(resource_group_name: impl Into<String>, snapshot_name: impl Into<String>) -> Self {
        Self {
            resource_group_name: resource_group_name.into(),
            snapshot_name: snapshot_name.into(),
            disk_id: None,
            location: None,
        }
    }

    pub fn with_source(mut self, disk_id: impl Into<String>, location: impl Into<String>) -> Self {
        self.disk_id = Some(disk_id.into());
        self.location = Some(location.into());
        self
    }
}
