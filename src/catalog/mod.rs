//! Record catalog: the immutable dataset for a session.
//!
//! The store is the leaf of the application. It answers id lookups and exposes
//! the derived category groups the view engine and renderer iterate over.

mod record;
mod store;

pub use record::{CategoryGroup, Record, RecordId, UNCATEGORIZED};
pub use store::{CatalogError, RecordStore};
