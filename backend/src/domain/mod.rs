//! # Domain Module
//!
//! Business logic for the diary inventory ledger.
//!
//! ## Module Organization
//!
//! - **id_generator**: Collision-free `DRY-{year}-{code}-{seq}` identifiers
//! - **inventory_service**: The ledger of generated diaries and their status transitions
//! - **request_service**: Vendor restock requests and their fulfilment
//! - **notification_service**: In-app notifications for admins and vendors
//! - **diary_catalog**: Which diary types may currently be generated or requested
//! - **clock**: Injectable time source
//!
//! ## Business Rules
//!
//! - Diary IDs are unique across the ledger and never reused
//! - A diary moves `unassigned → assigned → active → inactive`; only an
//!   assigned diary can go back to the pool
//! - A request is fulfilled or rejected exactly once; fulfilment creates
//!   exactly `quantity` diaries already assigned to the requesting vendor
//! - Every operation returns a [`LedgerResult`]; rejected commands leave
//!   state untouched

pub mod clock;
pub mod commands;
pub mod diary_catalog;
pub mod error;
pub mod id_generator;
pub mod inventory_service;
pub mod models;
pub mod notification_service;
pub mod request_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use diary_catalog::DiaryTypeCatalog;
pub use error::{LedgerError, LedgerResult};
pub use id_generator::DiaryIdGenerator;
pub use inventory_service::InventoryService;
pub use notification_service::NotificationService;
pub use request_service::RequestService;
