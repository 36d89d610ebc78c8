//! # Diary Ledger Backend
//!
//! Inventory ledger and restock request service for patient diaries.
//!
//! ## Architecture
//!
//! ```text
//! Dashboard (admin / vendor)
//!     ↓
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (ID generator, inventory ledger, request reconciler, notifications)
//!     ↓
//! Storage Layer (in-memory tables)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::http::{HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::domain::{
    Clock, DiaryIdGenerator, DiaryTypeCatalog, InventoryService, NotificationService,
    RequestService, SystemClock,
};
use crate::storage::MemoryConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub catalog: DiaryTypeCatalog,
    pub inventory_service: InventoryService<MemoryConnection>,
    pub request_service: RequestService<MemoryConnection>,
    pub notification_service: NotificationService<MemoryConnection>,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &ServerConfig) -> AppState {
    initialize_with_clock(config, Arc::new(SystemClock))
}

/// Same as [`initialize_backend`] with an explicit time source
pub fn initialize_with_clock(config: &ServerConfig, clock: Arc<dyn Clock>) -> AppState {
    info!("Setting up storage");
    let connection = MemoryConnection::new();

    info!(
        "Setting up domain model with diary types {:?}",
        config.enabled_diary_types
    );
    let catalog = DiaryTypeCatalog::with_enabled(config.enabled_diary_types.iter().copied());
    let notification_service = NotificationService::new(&connection, clock.clone());
    let id_generator = DiaryIdGenerator::new(&connection, catalog.clone(), clock.clone());
    let inventory_service = InventoryService::new(
        &connection,
        id_generator,
        notification_service.clone(),
        clock.clone(),
    );
    let request_service = RequestService::new(
        &connection,
        inventory_service.clone(),
        notification_service.clone(),
        catalog.clone(),
        clock,
    );

    AppState {
        catalog,
        inventory_service,
        request_service,
        notification_service,
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // CORS setup to allow the dashboard to make requests
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/diary-types", io::rest::catalog_apis::router())
        .nest("/diaries", io::rest::diary_apis::router())
        .nest("/diary-requests", io::rest::request_apis::router())
        .nest("/notifications", io::rest::notification_apis::router())
        .nest("/logs", io::rest::logging_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
