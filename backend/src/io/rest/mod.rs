//! # REST API Interface Layer
//!
//! HTTP endpoints for the diary ledger. This layer handles:
//! - JSON request/response serialization
//! - Parsing wire strings into domain types (via the mappers)
//! - Error translation from [`LedgerError`](crate::domain::LedgerError) to HTTP status codes
//! - Request logging
//!
//! Each `*_apis` module exposes a `router()` that is nested under `/api`.

pub mod catalog_apis;
pub mod diary_apis;
pub mod error;
pub mod logging_apis;
pub mod mappers;
pub mod notification_apis;
pub mod request_apis;

pub use error::{ApiError, ApiResult};
