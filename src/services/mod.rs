// Service exports
pub mod store;

pub use store::{PropertyStore, StoreError, compute_stats};
