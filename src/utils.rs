mod snapshot_table;

pub use self::snapshot_table::*;
