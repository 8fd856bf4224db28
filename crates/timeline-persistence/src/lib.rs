pub mod catalog;
pub mod store;
pub mod traits;

pub use catalog::{ListEntry, ViewCatalog};
pub use store::{AtomicWriter, JsonCatalogStore};
pub use traits::{CatalogStore, PersistenceMetadata, FORMAT_VERSION};
