use chrono::{DateTime, Utc};
use std::fmt;

use super::diary::DiaryType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainRequestStatus {
    Pending,
    Fulfilled,
    Rejected,
}

impl fmt::Display for DomainRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DomainRequestStatus::Pending => "pending",
            DomainRequestStatus::Fulfilled => "fulfilled",
            DomainRequestStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Vendor restock request owned by the request reconciler
#[derive(Debug, Clone, PartialEq)]
pub struct DomainDiaryRequest {
    pub id: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub diary_type: DiaryType,
    pub quantity: u32,
    pub message: Option<String>,
    pub request_date: DateTime<Utc>,
    pub status: DomainRequestStatus,
    pub fulfilled_date: Option<DateTime<Utc>>,
    pub assigned_diary_ids: Option<Vec<String>>,
    pub rejection_reason: Option<String>,
}

impl DomainDiaryRequest {
    pub fn generate_id() -> String {
        format!("request::{}", uuid::Uuid::new_v4())
    }
}
