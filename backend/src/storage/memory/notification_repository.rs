use std::sync::{Arc, Mutex};

use super::lock_table;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::notification::{DomainNotification, Recipient};
use crate::storage::traits::NotificationStorage;

#[derive(Clone)]
pub struct NotificationRepository {
    table: Arc<Mutex<Vec<DomainNotification>>>,
}

impl NotificationRepository {
    pub fn new(table: Arc<Mutex<Vec<DomainNotification>>>) -> Self {
        Self { table }
    }
}

impl NotificationStorage for NotificationRepository {
    fn store_notification(&self, notification: &DomainNotification) -> LedgerResult<()> {
        let mut table = lock_table(&self.table)?;
        table.push(notification.clone());
        Ok(())
    }

    fn list_notifications(&self, recipient: &Recipient) -> LedgerResult<Vec<DomainNotification>> {
        let table = lock_table(&self.table)?;
        Ok(table
            .iter()
            .filter(|n| &n.recipient == recipient)
            .cloned()
            .collect())
    }

    fn mark_read(&self, notification_id: &str) -> LedgerResult<DomainNotification> {
        let mut table = lock_table(&self.table)?;
        let notification = table
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| LedgerError::notification_not_found(notification_id))?;
        notification.read = true;
        Ok(notification.clone())
    }

    fn mark_all_read(&self, recipient: &Recipient) -> LedgerResult<usize> {
        let mut table = lock_table(&self.table)?;
        let mut updated = 0;
        for notification in table.iter_mut().filter(|n| &n.recipient == recipient && !n.read) {
            notification.read = true;
            updated += 1;
        }
        Ok(updated)
    }
}
