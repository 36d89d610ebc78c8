//! # REST API for In-App Notifications

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::{debug, info};

use crate::domain::commands::notifications::NotificationListQuery;
use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::notification_mapper::NotificationMapper;
use crate::AppState;
use shared::{
    MarkAllNotificationsReadRequest, MarkNotificationsReadResponse, Notification,
    NotificationListRequest, NotificationListResponse, UnreadCountRequest, UnreadCountResponse,
};

/// Create a router for notification APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
}

/// Notifications for one recipient, oldest first
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(request): Query<NotificationListRequest>,
) -> ApiResult<Json<NotificationListResponse>> {
    debug!("GET /api/notifications - query: {:?}", request);

    let query = NotificationListQuery {
        recipient: NotificationMapper::recipient_to_domain(&request.recipient)?,
        unread_only: request.unread_only,
    };
    let result = state.notification_service.list(query)?;
    Ok(Json(NotificationMapper::to_list_response(result)))
}

pub async fn unread_count(
    State(state): State<AppState>,
    Query(request): Query<UnreadCountRequest>,
) -> ApiResult<Json<UnreadCountResponse>> {
    debug!("GET /api/notifications/unread-count - recipient: {}", request.recipient);

    let recipient = NotificationMapper::recipient_to_domain(&request.recipient)?;
    let unread_count = state.notification_service.unread_count(&recipient)?;
    Ok(Json(UnreadCountResponse {
        recipient: recipient.to_string(),
        unread_count,
    }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> ApiResult<Json<Notification>> {
    info!("POST /api/notifications/{}/read", notification_id);

    let notification = state.notification_service.mark_read(&notification_id)?;
    Ok(Json(NotificationMapper::to_dto(notification)))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    Json(request): Json<MarkAllNotificationsReadRequest>,
) -> ApiResult<Json<MarkNotificationsReadResponse>> {
    info!("POST /api/notifications/read-all - recipient: {}", request.recipient);

    let recipient = NotificationMapper::recipient_to_domain(&request.recipient)?;
    let updated_count = state.notification_service.mark_all_read(&recipient)?;
    let success_message = match updated_count {
        1 => "1 notification marked as read".to_string(),
        n => format!("{} notifications marked as read", n),
    };
    Ok(Json(MarkNotificationsReadResponse {
        updated_count,
        success_message,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{decode, send, test_state, NO_BODY};
    use axum::http::StatusCode;
    use serde_json::json;
    use shared::{
        ErrorResponse, MarkNotificationsReadResponse, Notification, NotificationListResponse,
        NotificationSeverity, UnreadCountResponse,
    };

    #[tokio::test]
    async fn test_assignment_notifies_vendor() {
        let state = test_state();
        send(
            &state,
            "POST",
            "/api/diaries/generate",
            Some(json!({ "diary_type": "peri-operative", "quantity": 2 })),
        )
        .await;
        send(
            &state,
            "POST",
            "/api/diaries/bulk-assign",
            Some(json!({
                "diary_ids": ["DRY-2025-PO-001", "DRY-2025-PO-002"],
                "vendor_id": "V001"
            })),
        )
        .await;

        let (status, body) = send(
            &state,
            "GET",
            "/api/notifications?recipient=vendor:V001",
            NO_BODY,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let listed: NotificationListResponse = decode(&body);
        assert_eq!(listed.notifications.len(), 2);
        assert_eq!(listed.unread_count, 2);
        assert_eq!(listed.notifications[0].recipient, "vendor:V001");
        assert_eq!(listed.notifications[0].severity, NotificationSeverity::Info);
        assert!(listed.notifications[0].message.contains("DRY-2025-PO-001"));

        let (status, body) = send(
            &state,
            "GET",
            "/api/notifications/unread-count?recipient=vendor:V001",
            NO_BODY,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let badge: UnreadCountResponse = decode(&body);
        assert_eq!(badge.recipient, "vendor:V001");
        assert_eq!(badge.unread_count, 2);

        let uri = format!("/api/notifications/{}/read", listed.notifications[0].id);
        let (status, body) = send(&state, "POST", &uri, NO_BODY).await;
        assert_eq!(status, StatusCode::OK);
        assert!(decode::<Notification>(&body).read);

        let (_, body) = send(
            &state,
            "GET",
            "/api/notifications?recipient=vendor:V001&unread_only=true",
            NO_BODY,
        )
        .await;
        let unread: NotificationListResponse = decode(&body);
        assert_eq!(unread.notifications.len(), 1);

        let (status, body) = send(
            &state,
            "POST",
            "/api/notifications/read-all",
            Some(json!({ "recipient": "vendor:V001" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let marked: MarkNotificationsReadResponse = decode(&body);
        assert_eq!(marked.updated_count, 1);
        assert_eq!(marked.success_message, "1 notification marked as read");
    }

    #[tokio::test]
    async fn test_bad_recipient_and_unknown_id() {
        let state = test_state();

        let (status, body) = send(&state, "GET", "/api/notifications?recipient=doctor:D1", NO_BODY).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(decode::<ErrorResponse>(&body).code, "BAD_REQUEST");

        let (status, _) = send(&state, "POST", "/api/notifications/missing/read", NO_BODY).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
