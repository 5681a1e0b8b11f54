pub mod memstore;
pub mod seed;

pub use memstore::MemStore;
