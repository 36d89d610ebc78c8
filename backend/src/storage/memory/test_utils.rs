/// Test utilities module for consistent test infrastructure
///
/// Every test gets its own in-memory store, a clock frozen in 2025 and the
/// full set of services wired over them, so tests never share state.
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::domain::clock::{Clock, FixedClock};
use crate::domain::diary_catalog::DiaryTypeCatalog;
use crate::domain::id_generator::DiaryIdGenerator;
use crate::domain::inventory_service::InventoryService;
use crate::domain::notification_service::NotificationService;
use crate::domain::request_service::RequestService;

/// Fresh store plus services, dropped at the end of the test
pub struct TestEnvironment {
    pub connection: MemoryConnection,
    pub catalog: DiaryTypeCatalog,
    pub clock: Arc<FixedClock>,
    pub notification_service: NotificationService<MemoryConnection>,
    pub inventory_service: InventoryService<MemoryConnection>,
    pub request_service: RequestService<MemoryConnection>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let connection = MemoryConnection::new();
        let catalog = DiaryTypeCatalog::all_enabled();
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        ));
        let shared_clock: Arc<dyn Clock> = clock.clone();

        let notification_service = NotificationService::new(&connection, shared_clock.clone());
        let id_generator = DiaryIdGenerator::new(&connection, catalog.clone(), shared_clock.clone());
        let inventory_service = InventoryService::new(
            &connection,
            id_generator,
            notification_service.clone(),
            shared_clock.clone(),
        );
        let request_service = RequestService::new(
            &connection,
            inventory_service.clone(),
            notification_service.clone(),
            catalog.clone(),
            shared_clock,
        );

        Self {
            connection,
            catalog,
            clock,
            notification_service,
            inventory_service,
            request_service,
        }
    }

    /// The instant every service sees as "now"
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
