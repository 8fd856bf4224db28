pub mod atomic_writer;
pub mod json_catalog_store;

pub use atomic_writer::AtomicWriter;
pub use json_catalog_store::JsonCatalogStore;
