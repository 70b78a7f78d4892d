//! Transaction-store boundary.
//!
//! This crate defines the engine-facing abstraction for reading dated
//! transaction rows without making any storage assumptions. Concrete query
//! languages and schemas live behind the trait; the engine only ever sees
//! `RawObservation`s.

pub mod in_memory;
pub mod observation;
pub mod r#trait;

pub use in_memory::InMemoryTransactionStore;
pub use observation::RawObservation;
pub use r#trait::{StoreError, TransactionStore};
