mod cache;
pub(crate) mod refresh;

pub use cache::{Availability, DoorphoneCache, Snapshot};
