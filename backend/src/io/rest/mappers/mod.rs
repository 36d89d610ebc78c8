//! Conversions between the `shared` wire DTOs and domain types.
//!
//! Wire strings (diary types, recipients) are parsed here, so malformed
//! input is rejected before it reaches a service.

pub mod diary_mapper;
pub mod notification_mapper;
pub mod request_mapper;
