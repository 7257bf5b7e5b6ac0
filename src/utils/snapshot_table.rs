use crate::prelude::*;
use prettytable::{row, Table};
use std::fmt;

/// Renders snapshots found by the list-by-age form; renders nothing when
/// there aren't any.
pub struct SnapshotTable<'a> {
    listing: &'a Listing,
}

impl<'a> SnapshotTable<'a> {
    pub fn new(listing: &'a Listing) -> Self {
        Self { listing }
    }
}

impl fmt::Display for SnapshotTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.listing.snapshots.is_empty() {
            return Ok(());
        }

        let title = format!("Snapshots older than {} days:", self.listing.days);
        let mut table = Table::new();

        table.set_titles(row!["Name", "Resource Group", "Created"]);

        for snapshot in &self.listing.snapshots {
            table.add_row(row![
                snapshot.name,
                snapshot.resource_group,
                snapshot.created_at()
            ]);
        }

        writeln!(f, "{}", title.bold())?;
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Snapshot;
    use crate::assert_stdout;
    use crate::testing::force_colors;

    fn snapshot(name: &str, resource_group: &str, creation_time: &str) -> Snapshot {
        Snapshot {
            name: name.into(),
            resource_group: resource_group.into(),
            creation_time: creation_time.into(),
        }
    }

    #[test]
    fn test() {
        let listing = Listing {
            days: 30,
            snapshots: vec![
                snapshot("snapshot1", "rg-1", "2024-01-01T00:00:00Z"),
                snapshot("snapshot2", "rg-2", "2024-02-01T00:00:00.5+00:00"),
                snapshot("snapshot3", "rg-3", "last tuesday"),
            ],
        };

        force_colors();

        assert_stdout!(
            r#"
            <b>Snapshots older than 30 days:</b>
            +-----------+----------------+----------------------+
            | Name      | Resource Group | Created              |
            +===========+================+======================+
            | snapshot1 | rg-1           | 2024-01-01T00:00:00Z |
            +-----------+----------------+----------------------+
            | snapshot2 | rg-2           | 2024-02-01T00:00:00Z |
            +-----------+----------------+----------------------+
            | snapshot3 | rg-3           | last tuesday         |
            +-----------+----------------+----------------------+
            "#,
            SnapshotTable::new(&listing).to_string().as_bytes()
        );
    }

    #[test]
    fn given_no_snapshots() {
        let listing = Listing {
            days: 7,
            snapshots: Default::default(),
        };

        assert_eq!("", SnapshotTable::new(&listing).to_string());
    }
}
