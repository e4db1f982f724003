//! Noire Storage
//!
//! Adapters for the ports declared in `noire-core`:
//! - [`MemoryPolicyStore`]: process-local skip-policy storage
//! - [`JsonFilePolicyStore`]: skip-policy blob in a JSON file, replaced atomically
//! - [`MemoryCatalog`]: in-memory song catalog with mood/recency queries
//!
//! # Example
//!
//! ```rust
//! use noire_core::{PolicyStore, SkipPolicyState};
//! use noire_storage::MemoryPolicyStore;
//!
//! let mut store = MemoryPolicyStore::new();
//! let reloaded = store.clone();
//!
//! store.set(&SkipPolicyState { skip_count: 4, lockout_until: 0 }).unwrap();
//! assert_eq!(reloaded.get().unwrap().unwrap().skip_count, 4);
//! ```

pub mod catalog;
pub mod error;
pub mod file;
pub mod memory;

pub use catalog::MemoryCatalog;
pub use error::{Result, StorageError};
pub use file::JsonFilePolicyStore;
pub use memory::MemoryPolicyStore;
