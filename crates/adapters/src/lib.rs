//! permapress adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `kubo`: HTTP adapter for the Kubo (IPFS node) RPC API, implementing
//!   both `ContentStore` and `NameService`
//! - `records`: JSON-file and in-memory record stores

mod kubo;
mod records_fs;
mod records_memory;

pub use kubo::KuboNode;

/// Re-exports for record store adapters
pub mod records {
    pub use crate::records_fs::JsonRecordStore;
    pub use crate::records_memory::InMemoryRecordStore;
}
