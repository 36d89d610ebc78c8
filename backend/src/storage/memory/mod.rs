//! In-memory storage backend.
//!
//! Records live for the lifetime of the process. Each table sits behind its
//! own mutex; code that needs both always takes the request table first.

pub mod connection;
pub mod diary_repository;
pub mod notification_repository;
pub mod request_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::MemoryConnection;
pub use diary_repository::DiaryRepository;
pub use notification_repository::NotificationRepository;
pub use request_repository::RequestRepository;

use std::sync::{Mutex, MutexGuard};

use crate::domain::error::{LedgerError, LedgerResult};

/// Lock a table, turning poisoning into a storage error
pub(crate) fn lock_table<T>(table: &Mutex<T>) -> LedgerResult<MutexGuard<'_, T>> {
    table
        .lock()
        .map_err(|e| LedgerError::Storage(format!("table lock poisoned: {}", e)))
}
