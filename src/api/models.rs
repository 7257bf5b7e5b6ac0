mod responses;
mod serde;
mod snapshot;
mod snapshot_request;

pub use self::{responses::*, snapshot::*, snapshot_request::*};
