//! # Storage Traits
//!
//! Storage abstraction used by the domain services. The in-memory backend is
//! the only implementation today; the traits keep the services independent
//! of it so a persistent backend can slot in behind the same interface.
//!
//! Read-modify-write operations take a closure that runs while the record is
//! locked, so a status check and the mutation it guards can never interleave
//! with another writer.

use crate::domain::error::LedgerResult;
use crate::domain::models::diary::{DiaryType, DomainDiary};
use crate::domain::models::notification::{DomainNotification, Recipient};
use crate::domain::models::request::DomainDiaryRequest;

/// Storage operations for the diary ledger
pub trait DiaryStorage: Send + Sync {
    /// Reserve `count` consecutive sequence numbers for a diary type and
    /// return the first one.
    ///
    /// The first number of a reservation is never lower than
    /// `count(stored diaries of this type) + 1`, and two reservations never
    /// overlap.
    fn reserve_sequence(&self, diary_type: DiaryType, count: u32) -> LedgerResult<u32>;

    /// Append diaries in the given order.
    /// Fails without storing anything if any ID is already present.
    /// Sequence numbers carried by the appended IDs are never reserved later.
    fn append_diaries(&self, diaries: &[DomainDiary]) -> LedgerResult<()>;

    fn get_diary(&self, diary_id: &str) -> LedgerResult<Option<DomainDiary>>;

    /// Apply `apply` to the stored diary under lock and return the result.
    /// Nothing is written when `apply` returns an error.
    fn update_diary<F>(&self, diary_id: &str, apply: F) -> LedgerResult<DomainDiary>
    where
        F: FnOnce(&mut DomainDiary) -> LedgerResult<()>;

    /// All diaries in append order
    fn list_diaries(&self) -> LedgerResult<Vec<DomainDiary>>;
}

/// Storage operations for vendor restock requests
pub trait RequestStorage: Send + Sync {
    fn store_request(&self, request: &DomainDiaryRequest) -> LedgerResult<()>;

    fn get_request(&self, request_id: &str) -> LedgerResult<Option<DomainDiaryRequest>>;

    /// Apply `apply` to the stored request under lock.
    /// Nothing is written when `apply` returns an error.
    fn update_request<F>(&self, request_id: &str, apply: F) -> LedgerResult<DomainDiaryRequest>
    where
        F: FnOnce(&mut DomainDiaryRequest) -> LedgerResult<()>;

    /// Remove the request if `check` accepts it, returning the removed record
    fn remove_request<F>(&self, request_id: &str, check: F) -> LedgerResult<DomainDiaryRequest>
    where
        F: FnOnce(&DomainDiaryRequest) -> LedgerResult<()>;

    /// All requests in submission order
    fn list_requests(&self) -> LedgerResult<Vec<DomainDiaryRequest>>;
}

/// Storage operations for in-app notifications
pub trait NotificationStorage: Send + Sync {
    fn store_notification(&self, notification: &DomainNotification) -> LedgerResult<()>;

    /// Notifications for one recipient, oldest first
    fn list_notifications(&self, recipient: &Recipient) -> LedgerResult<Vec<DomainNotification>>;

    fn mark_read(&self, notification_id: &str) -> LedgerResult<DomainNotification>;

    /// Returns the number of notifications that changed from unread to read
    fn mark_all_read(&self, recipient: &Recipient) -> LedgerResult<usize>;
}

/// Factory for repositories sharing one underlying store
pub trait Connection: Send + Sync + Clone {
    type DiaryRepository: DiaryStorage + Clone;
    type RequestRepository: RequestStorage + Clone;
    type NotificationRepository: NotificationStorage + Clone;

    fn create_diary_repository(&self) -> Self::DiaryRepository;
    fn create_request_repository(&self) -> Self::RequestRepository;
    fn create_notification_repository(&self) -> Self::NotificationRepository;
}
