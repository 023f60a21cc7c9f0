pub mod error;
pub mod memory;
pub mod query;
pub mod record;
pub mod store;

pub use common::RecordId;
pub use error::{Result, StoreError};
pub use memory::InMemoryRecordStore;
pub use query::RecordQuery;
pub use record::{Record, Stored};
pub use store::RecordStore;
