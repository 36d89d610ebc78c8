//! # REST API for the Diary Inventory Ledger
//!
//! Endpoints for generating diaries, assigning them to vendors and moving
//! them through their lifecycle.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tracing::{debug, info};

use crate::domain::commands::inventory::{
    ActivateDiaryCommand, AssignDiaryCommand, BulkAssignCommand, DiaryTransitionResult,
    GenerateDiariesCommand,
};
use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::diary_mapper::DiaryMapper;
use crate::AppState;
use shared::{
    ActivateDiaryRequest, AssignDiaryRequest, BulkAssignDiariesRequest, BulkAssignDiariesResponse,
    DiaryListRequest, DiaryListResponse, DiaryResponse, GenerateDiariesRequest,
    GenerateDiariesResponse, GeneratedDiary, InventorySummaryResponse,
};

/// Create a router for diary ledger APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_diaries))
        .route("/generate", post(generate_diaries))
        .route("/summary", get(get_summary))
        .route("/bulk-assign", post(bulk_assign))
        .route("/:id", get(get_diary))
        .route("/:id/assign", post(assign_diary))
        .route("/:id/unassign", post(unassign_diary))
        .route("/:id/reassign", post(reassign_diary))
        .route("/:id/activate", post(activate_diary))
        .route("/:id/deactivate", post(deactivate_diary))
}

fn to_response(result: DiaryTransitionResult) -> Json<DiaryResponse> {
    Json(DiaryResponse {
        diary: DiaryMapper::to_dto(result.diary),
        success_message: result.success_message,
    })
}

/// Generate a batch of unassigned diaries
pub async fn generate_diaries(
    State(state): State<AppState>,
    Json(request): Json<GenerateDiariesRequest>,
) -> ApiResult<(StatusCode, Json<GenerateDiariesResponse>)> {
    info!("POST /api/diaries/generate - request: {:?}", request);

    let command = GenerateDiariesCommand {
        diary_type: DiaryMapper::type_to_domain(&request.diary_type)?,
        quantity: request.quantity,
    };
    let result = state.inventory_service.generate_diaries(command)?;

    let response = GenerateDiariesResponse {
        diaries: DiaryMapper::to_dto_list(result.diaries),
        success_message: result.success_message,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// List diaries matching the optional filters, in generation order
pub async fn list_diaries(
    State(state): State<AppState>,
    Query(request): Query<DiaryListRequest>,
) -> ApiResult<Json<DiaryListResponse>> {
    debug!("GET /api/diaries - query: {:?}", request);

    let filter = DiaryMapper::to_filter(request)?;
    let diaries = state.inventory_service.filter(&filter)?;
    Ok(Json(DiaryListResponse {
        diaries: DiaryMapper::to_dto_list(diaries),
    }))
}

#[derive(Debug, serde::Deserialize)]
pub struct SummaryQuery {
    pub vendor_id: Option<String>,
}

/// Per-type inventory counts for the dashboard cards
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<InventorySummaryResponse>> {
    debug!("GET /api/diaries/summary - vendor: {:?}", query.vendor_id);

    let summary = state.inventory_service.summary(query.vendor_id.as_deref())?;
    Ok(Json(DiaryMapper::to_summary_response(summary)))
}

pub async fn get_diary(
    State(state): State<AppState>,
    Path(diary_id): Path<String>,
) -> ApiResult<Json<GeneratedDiary>> {
    debug!("GET /api/diaries/{}", diary_id);

    let diary = state.inventory_service.get_diary(&diary_id)?;
    Ok(Json(DiaryMapper::to_dto(diary)))
}

pub async fn assign_diary(
    State(state): State<AppState>,
    Path(diary_id): Path<String>,
    Json(request): Json<AssignDiaryRequest>,
) -> ApiResult<Json<DiaryResponse>> {
    info!("POST /api/diaries/{}/assign - vendor: {}", diary_id, request.vendor_id);

    let result = state.inventory_service.assign(AssignDiaryCommand {
        diary_id,
        vendor_id: request.vendor_id,
    })?;
    Ok(to_response(result))
}

/// Assign several diaries at once; failures are reported per diary
pub async fn bulk_assign(
    State(state): State<AppState>,
    Json(request): Json<BulkAssignDiariesRequest>,
) -> ApiResult<Json<BulkAssignDiariesResponse>> {
    info!("POST /api/diaries/bulk-assign - request: {:?}", request);

    let result = state.inventory_service.bulk_assign(BulkAssignCommand {
        diary_ids: request.diary_ids,
        vendor_id: request.vendor_id,
    })?;
    Ok(Json(DiaryMapper::to_bulk_assign_response(result)))
}

pub async fn unassign_diary(
    State(state): State<AppState>,
    Path(diary_id): Path<String>,
) -> ApiResult<Json<DiaryResponse>> {
    info!("POST /api/diaries/{}/unassign", diary_id);

    let result = state.inventory_service.unassign(&diary_id)?;
    Ok(to_response(result))
}

pub async fn reassign_diary(
    State(state): State<AppState>,
    Path(diary_id): Path<String>,
    Json(request): Json<AssignDiaryRequest>,
) -> ApiResult<Json<DiaryResponse>> {
    info!("POST /api/diaries/{}/reassign - vendor: {}", diary_id, request.vendor_id);

    let result = state.inventory_service.reassign(AssignDiaryCommand {
        diary_id,
        vendor_id: request.vendor_id,
    })?;
    Ok(to_response(result))
}

pub async fn activate_diary(
    State(state): State<AppState>,
    Path(diary_id): Path<String>,
    Json(request): Json<ActivateDiaryRequest>,
) -> ApiResult<Json<DiaryResponse>> {
    info!("POST /api/diaries/{}/activate", diary_id);

    let result = state.inventory_service.activate(ActivateDiaryCommand {
        diary_id,
        patient_name: request.patient_name,
    })?;
    Ok(to_response(result))
}

pub async fn deactivate_diary(
    State(state): State<AppState>,
    Path(diary_id): Path<String>,
) -> ApiResult<Json<DiaryResponse>> {
    info!("POST /api/diaries/{}/deactivate", diary_id);

    let result = state.inventory_service.deactivate(&diary_id)?;
    Ok(to_response(result))
}
