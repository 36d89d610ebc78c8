use shared::{Notification, NotificationListResponse, NotificationSeverity};

use crate::domain::commands::notifications::NotificationListResult;
use crate::domain::models::notification::{DomainNotification, Recipient, Severity};
use crate::io::rest::error::{ApiError, ApiResult};

pub struct NotificationMapper;

impl NotificationMapper {
    pub fn severity_to_dto(severity: Severity) -> NotificationSeverity {
        match severity {
            Severity::Info => NotificationSeverity::Info,
            Severity::Success => NotificationSeverity::Success,
            Severity::Warning => NotificationSeverity::Warning,
            Severity::Error => NotificationSeverity::Error,
        }
    }

    /// Parse `"admin"` or `"vendor:<id>"`
    pub fn recipient_to_domain(recipient: &str) -> ApiResult<Recipient> {
        recipient.parse().map_err(ApiError::BadRequest)
    }

    pub fn to_dto(domain: DomainNotification) -> Notification {
        Notification {
            id: domain.id,
            recipient: domain.recipient.to_string(),
            severity: Self::severity_to_dto(domain.severity),
            message: domain.message,
            timestamp: domain.timestamp.to_rfc3339(),
            read: domain.read,
        }
    }

    pub fn to_list_response(result: NotificationListResult) -> NotificationListResponse {
        NotificationListResponse {
            notifications: result.notifications.into_iter().map(Self::to_dto).collect(),
            unread_count: result.unread_count,
        }
    }
}
