pub mod conformance;
mod error;
mod memory;
mod record;
mod traits;

pub use error::StorageError;
pub use memory::InMemoryStore;
pub use record::{DecisionWriteRecord, DeclarationRecord, StoreSeed};
pub use traits::DecisionStore;
