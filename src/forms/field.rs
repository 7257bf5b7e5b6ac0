use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ResourceGroupName,
    SnapshotName,
    DiskId,
    Location,
    Days,
}

impl Field {
    /// Name of the field in the backend's JSON bodies.
    pub fn name(self) -> &'static str {
        match self {
            Field::ResourceGroupName => "resourceGroupName",
            Field::SnapshotName => "snapshotName",
            Field::DiskId => "diskId",
            Field::Location => "location",
            Field::Days => "days",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
