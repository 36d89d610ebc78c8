//! Notification sink for ledger events.
//!
//! The inventory ledger and the request reconciler report assignments,
//! submissions and fulfilments here. Delivery (polling, push) is up to the
//! caller; this service only records `{recipient, severity, message,
//! timestamp}` and tracks read state.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::clock::Clock;
use crate::domain::commands::notifications::{NotificationListQuery, NotificationListResult};
use crate::domain::error::LedgerResult;
use crate::domain::models::notification::{DomainNotification, Recipient, Severity};
use crate::storage::{Connection, NotificationStorage};

#[derive(Clone)]
pub struct NotificationService<C: Connection> {
    notification_repository: C::NotificationRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> NotificationService<C> {
    pub fn new(connection: &C, clock: Arc<dyn Clock>) -> Self {
        Self {
            notification_repository: connection.create_notification_repository(),
            clock,
        }
    }

    /// Record a new unread notification
    pub fn notify(
        &self,
        recipient: Recipient,
        severity: Severity,
        message: impl Into<String>,
    ) -> LedgerResult<DomainNotification> {
        let notification = DomainNotification {
            id: DomainNotification::generate_id(),
            recipient,
            severity,
            message: message.into(),
            timestamp: self.clock.now(),
            read: false,
        };
        self.notification_repository.store_notification(&notification)?;
        debug!("Notification {} queued for {}", notification.id, notification.recipient);
        Ok(notification)
    }

    pub fn list(&self, query: NotificationListQuery) -> LedgerResult<NotificationListResult> {
        let all = self.notification_repository.list_notifications(&query.recipient)?;
        let unread_count = all.iter().filter(|n| !n.read).count();
        let notifications = if query.unread_only {
            all.into_iter().filter(|n| !n.read).collect()
        } else {
            all
        };
        Ok(NotificationListResult {
            notifications,
            unread_count,
        })
    }

    /// Unread notifications for the recipient's badge
    pub fn unread_count(&self, recipient: &Recipient) -> LedgerResult<usize> {
        Ok(self
            .notification_repository
            .list_notifications(recipient)?
            .iter()
            .filter(|n| !n.read)
            .count())
    }

    pub fn mark_read(&self, notification_id: &str) -> LedgerResult<DomainNotification> {
        let notification = self.notification_repository.mark_read(notification_id)?;
        info!("Notification {} marked read", notification_id);
        Ok(notification)
    }

    pub fn mark_all_read(&self, recipient: &Recipient) -> LedgerResult<usize> {
        let updated = self.notification_repository.mark_all_read(recipient)?;
        info!("Marked {} notifications read for {}", updated, recipient);
        Ok(updated)
    }
}
