//! Request reconciler.
//!
//! Vendors ask for restock batches; the admin approves or rejects them.
//! Approval generates the diaries straight into the ledger as assigned to
//! the requesting vendor. The whole approval runs inside one request-table
//! update, so a request is fulfilled at most once even when two admins
//! approve it at the same moment.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::requests::{
    CancelRequestCommand, CancelRequestResult, RejectRequestCommand, RequestListQuery,
    RequestTransitionResult, SubmitRequestCommand,
};
use crate::domain::diary_catalog::DiaryTypeCatalog;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::id_generator::validate_quantity;
use crate::domain::inventory_service::InventoryService;
use crate::domain::models::notification::{Recipient, Severity};
use crate::domain::models::request::{DomainDiaryRequest, DomainRequestStatus};
use crate::domain::notification_service::NotificationService;
use crate::storage::{Connection, RequestStorage};

#[derive(Clone)]
pub struct RequestService<C: Connection> {
    request_repository: C::RequestRepository,
    inventory_service: InventoryService<C>,
    notification_service: NotificationService<C>,
    catalog: DiaryTypeCatalog,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> RequestService<C> {
    pub fn new(
        connection: &C,
        inventory_service: InventoryService<C>,
        notification_service: NotificationService<C>,
        catalog: DiaryTypeCatalog,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            request_repository: connection.create_request_repository(),
            inventory_service,
            notification_service,
            catalog,
            clock,
        }
    }

    /// Record a pending restock request and tell the admin about it
    pub fn submit(&self, command: SubmitRequestCommand) -> LedgerResult<RequestTransitionResult> {
        info!(
            "Vendor {} requesting {} {} diaries",
            command.vendor_id, command.quantity, command.diary_type
        );

        if !self.catalog.is_enabled(command.diary_type)? {
            warn!("Request rejected: diary type {} is disabled", command.diary_type);
            return Err(LedgerError::InvalidType(command.diary_type.to_string()));
        }
        let quantity = validate_quantity(command.quantity)?;

        let vendor_id = command.vendor_id.trim();
        if vendor_id.is_empty() {
            return Err(LedgerError::InvalidTransition {
                entity: "vendor",
                id: String::new(),
                action: "submit",
                reason: "vendor id is required".to_string(),
            });
        }
        let vendor_name = match command.vendor_name.trim() {
            "" => vendor_id.to_string(),
            name => name.to_string(),
        };
        let message = command
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let request = DomainDiaryRequest {
            id: DomainDiaryRequest::generate_id(),
            vendor_id: vendor_id.to_string(),
            vendor_name,
            diary_type: command.diary_type,
            quantity,
            message,
            request_date: self.clock.now(),
            status: DomainRequestStatus::Pending,
            fulfilled_date: None,
            assigned_diary_ids: None,
            rejection_reason: None,
        };
        self.request_repository.store_request(&request)?;

        self.notification_service.notify(
            Recipient::Admin,
            Severity::Info,
            format!(
                "{} requested {} {} diaries",
                request.vendor_name, request.quantity, request.diary_type
            ),
        )?;

        info!("Request {} submitted", request.id);
        Ok(RequestTransitionResult {
            success_message: format!("Request for {} {} diaries submitted", quantity, request.diary_type),
            request,
        })
    }

    /// Fulfil a pending request with freshly generated, pre-assigned diaries
    pub fn approve(&self, request_id: &str) -> LedgerResult<RequestTransitionResult> {
        info!("Approving request {}", request_id);

        let result = self.request_repository.update_request(request_id, |request| {
            require_pending(request, "approve")?;

            let diaries = self.inventory_service.generate_for_vendor(
                request.diary_type,
                request.quantity,
                &request.vendor_id,
            )?;

            request.status = DomainRequestStatus::Fulfilled;
            request.fulfilled_date = Some(self.clock.now());
            request.assigned_diary_ids = Some(diaries.into_iter().map(|d| d.id).collect());
            Ok(())
        });

        let request = match result {
            Ok(request) => request,
            Err(e) => {
                warn!("Approval of request {} failed: {}", request_id, e);
                return Err(e);
            }
        };

        let assigned = request.assigned_diary_ids.as_deref().unwrap_or_default();
        info!("Request {} fulfilled with diaries {:?}", request.id, assigned);

        self.notification_service.notify(
            Recipient::Vendor(request.vendor_id.clone()),
            Severity::Success,
            format!(
                "Your request for {} {} diaries was approved: {}",
                request.quantity,
                request.diary_type,
                assigned.join(", ")
            ),
        )?;

        Ok(RequestTransitionResult {
            success_message: format!(
                "Request approved, {} diaries assigned to {}",
                assigned.len(),
                request.vendor_name
            ),
            request,
        })
    }

    /// Turn a pending request down. No diaries are generated.
    pub fn reject(&self, command: RejectRequestCommand) -> LedgerResult<RequestTransitionResult> {
        info!("Rejecting request {}", command.request_id);
        let reason = command
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let request = self.request_repository.update_request(&command.request_id, |request| {
            require_pending(request, "reject")?;
            request.status = DomainRequestStatus::Rejected;
            request.rejection_reason = reason.clone();
            Ok(())
        })?;

        let message = match &reason {
            Some(reason) => format!(
                "Your request for {} {} diaries was rejected: {}",
                request.quantity, request.diary_type, reason
            ),
            None => format!(
                "Your request for {} {} diaries was rejected",
                request.quantity, request.diary_type
            ),
        };
        self.notification_service.notify(
            Recipient::Vendor(request.vendor_id.clone()),
            Severity::Warning,
            message,
        )?;

        Ok(RequestTransitionResult {
            success_message: format!("Request {} rejected", request.id),
            request,
        })
    }

    /// Withdraw a pending request on behalf of the vendor who made it
    pub fn cancel(&self, command: CancelRequestCommand) -> LedgerResult<CancelRequestResult> {
        info!("Vendor {} cancelling request {}", command.vendor_id, command.request_id);
        let vendor_id = command.vendor_id.trim();

        let request = self.request_repository.remove_request(&command.request_id, |request| {
            // Other vendors' requests are invisible, not forbidden
            if request.vendor_id != vendor_id {
                return Err(LedgerError::request_not_found(&request.id));
            }
            if request.status != DomainRequestStatus::Pending {
                return Err(transition_error(request, "cancel"));
            }
            Ok(())
        })?;

        self.notification_service.notify(
            Recipient::Admin,
            Severity::Info,
            format!(
                "{} withdrew their request for {} {} diaries",
                request.vendor_name, request.quantity, request.diary_type
            ),
        )?;

        Ok(CancelRequestResult {
            success_message: format!("Request {} cancelled", request.id),
            request,
        })
    }

    pub fn get_request(&self, request_id: &str) -> LedgerResult<DomainDiaryRequest> {
        self.request_repository
            .get_request(request_id)?
            .ok_or_else(|| LedgerError::request_not_found(request_id))
    }

    pub fn list_requests(&self, query: &RequestListQuery) -> LedgerResult<Vec<DomainDiaryRequest>> {
        Ok(self
            .request_repository
            .list_requests()?
            .into_iter()
            .filter(|r| query.vendor_id.as_deref().map_or(true, |v| r.vendor_id == v))
            .filter(|r| query.status.map_or(true, |s| r.status == s))
            .collect())
    }
}

fn require_pending(request: &DomainDiaryRequest, action: &'static str) -> LedgerResult<()> {
    if request.status != DomainRequestStatus::Pending {
        return Err(transition_error(request, action));
    }
    Ok(())
}

fn transition_error(request: &DomainDiaryRequest, action: &'static str) -> LedgerError {
    LedgerError::InvalidTransition {
        entity: "request",
        id: request.id.clone(),
        action,
        reason: format!("request is already {}", request.status),
    }
}
