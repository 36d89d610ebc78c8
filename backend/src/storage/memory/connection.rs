use std::sync::{Arc, Mutex};
use tracing::info;

use super::diary_repository::{DiaryRepository, DiaryTable};
use super::notification_repository::NotificationRepository;
use super::request_repository::{RequestRepository, RequestTable};
use crate::domain::models::notification::DomainNotification;
use crate::storage::traits::Connection;

/// Owns the in-memory tables and hands out repositories over them.
///
/// Cloning the connection (or any repository) shares the same tables.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    diaries: Arc<Mutex<DiaryTable>>,
    requests: Arc<Mutex<RequestTable>>,
    notifications: Arc<Mutex<Vec<DomainNotification>>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        info!("Initialising in-memory diary ledger store");
        Self::default()
    }
}

#[cfg(test)]
impl MemoryConnection {
    /// Poison the notification table so every later write fails
    pub fn poison_notifications(&self) {
        let notifications = self.notifications.clone();
        let _ = std::thread::spawn(move || {
            let _guard = notifications.lock();
            panic!("poisoning notification table");
        })
        .join();
    }
}

impl Connection for MemoryConnection {
    type DiaryRepository = DiaryRepository;
    type RequestRepository = RequestRepository;
    type NotificationRepository = NotificationRepository;

    fn create_diary_repository(&self) -> Self::DiaryRepository {
        DiaryRepository::new(self.diaries.clone())
    }

    fn create_request_repository(&self) -> Self::RequestRepository {
        RequestRepository::new(self.requests.clone())
    }

    fn create_notification_repository(&self) -> Self::NotificationRepository {
        NotificationRepository::new(self.notifications.clone())
    }
}
