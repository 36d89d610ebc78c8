//! # Storage Module
//!
//! Holds the ledger's records. Domain services only talk to the traits in
//! [`traits`]; [`memory`] provides the session-scoped in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::MemoryConnection;
pub use traits::*;
