//! # REST API for the Diary Type Allowlist
//!
//! Admin settings page: which diary types may be generated or requested.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use tracing::{debug, info};

use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::diary_mapper::DiaryMapper;
use crate::AppState;
use shared::{DiaryTypeInfo, DiaryTypeListResponse, UpdateDiaryTypeRequest};

/// Create a router for diary type APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_diary_types))
        .route("/:diary_type", put(update_diary_type))
}

pub async fn list_diary_types(State(state): State<AppState>) -> ApiResult<Json<DiaryTypeListResponse>> {
    debug!("GET /api/diary-types");

    let types = state
        .catalog
        .list()?
        .into_iter()
        .map(DiaryMapper::type_entry_to_dto)
        .collect();
    Ok(Json(DiaryTypeListResponse { types }))
}

/// Enable or disable a diary type
pub async fn update_diary_type(
    State(state): State<AppState>,
    Path(diary_type): Path<String>,
    Json(request): Json<UpdateDiaryTypeRequest>,
) -> ApiResult<Json<DiaryTypeInfo>> {
    info!("PUT /api/diary-types/{} - enabled: {}", diary_type, request.enabled);

    let diary_type = DiaryMapper::type_to_domain(&diary_type)?;
    let entry = state.catalog.set_enabled(diary_type, request.enabled)?;
    Ok(Json(DiaryMapper::type_entry_to_dto(entry)))
}
