//! Filesystem adapters
//!
//! Material storage on the local disk.

pub mod material_storage;

pub use material_storage::LocalMaterialStorage;
