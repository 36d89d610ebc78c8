//! # REST API for Vendor Restock Requests

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::{debug, info};

use crate::domain::commands::requests::{
    CancelRequestCommand, RejectRequestCommand, RequestTransitionResult,
};
use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::request_mapper::RequestMapper;
use crate::AppState;
use shared::{
    CancelDiaryRequestQuery, CancelDiaryRequestResponse, DiaryRequest, DiaryRequestListRequest,
    DiaryRequestListResponse, DiaryRequestResponse, RejectDiaryRequestRequest,
    SubmitDiaryRequestRequest,
};

/// Create a router for diary request APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_request).get(list_requests))
        .route("/:id", get(get_request).delete(cancel_request))
        .route("/:id/approve", post(approve_request))
        .route("/:id/reject", post(reject_request))
}

fn to_response(result: RequestTransitionResult) -> Json<DiaryRequestResponse> {
    Json(DiaryRequestResponse {
        request: RequestMapper::to_dto(result.request),
        success_message: result.success_message,
    })
}

/// Vendor submits a restock request
pub async fn submit_request(
    State(state): State<AppState>,
    Json(request): Json<SubmitDiaryRequestRequest>,
) -> ApiResult<(StatusCode, Json<DiaryRequestResponse>)> {
    info!("POST /api/diary-requests - request: {:?}", request);

    let command = RequestMapper::to_submit_command(request)?;
    let result = state.request_service.submit(command)?;
    Ok((StatusCode::CREATED, to_response(result)))
}

pub async fn list_requests(
    State(state): State<AppState>,
    Query(request): Query<DiaryRequestListRequest>,
) -> ApiResult<Json<DiaryRequestListResponse>> {
    debug!("GET /api/diary-requests - query: {:?}", request);

    let query = RequestMapper::to_list_query(request);
    let requests = state.request_service.list_requests(&query)?;
    Ok(Json(DiaryRequestListResponse {
        requests: RequestMapper::to_dto_list(requests),
    }))
}

pub async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> ApiResult<Json<DiaryRequest>> {
    debug!("GET /api/diary-requests/{}", request_id);

    let request = state.request_service.get_request(&request_id)?;
    Ok(Json(RequestMapper::to_dto(request)))
}

/// Admin fulfils a pending request
pub async fn approve_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> ApiResult<Json<DiaryRequestResponse>> {
    info!("POST /api/diary-requests/{}/approve", request_id);

    let result = state.request_service.approve(&request_id)?;
    Ok(to_response(result))
}

/// Admin turns a pending request down; the body with a reason is optional
pub async fn reject_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    body: Option<Json<RejectDiaryRequestRequest>>,
) -> ApiResult<Json<DiaryRequestResponse>> {
    info!("POST /api/diary-requests/{}/reject", request_id);

    let request = body.map(|Json(request)| request).unwrap_or_default();
    let result = state.request_service.reject(RejectRequestCommand {
        request_id,
        reason: request.reason,
    })?;
    Ok(to_response(result))
}

/// Vendor withdraws their own pending request
pub async fn cancel_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Query(query): Query<CancelDiaryRequestQuery>,
) -> ApiResult<Json<CancelDiaryRequestResponse>> {
    info!("DELETE /api/diary-requests/{} - vendor: {}", request_id, query.vendor_id);

    let result = state.request_service.cancel(CancelRequestCommand {
        request_id,
        vendor_id: query.vendor_id,
    })?;
    Ok(Json(CancelDiaryRequestResponse {
        request_id: result.request.id,
        success_message: result.success_message,
    }))
}
