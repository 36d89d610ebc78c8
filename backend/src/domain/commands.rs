//! Domain-level command and query types.
//!
//! These structs are used by the services inside the domain layer and are
//! **not** exposed over the public API. The REST layer maps the DTOs from the
//! `shared` crate onto these types, parsing and validating wire strings on
//! the way in.

pub mod inventory {
    use crate::domain::error::LedgerError;
    use crate::domain::models::diary::{DiaryType, DomainDiary, DomainDiaryStatus};

    /// Input for generating a batch of unassigned diaries.
    #[derive(Debug, Clone)]
    pub struct GenerateDiariesCommand {
        pub diary_type: DiaryType,
        pub quantity: i64,
    }

    #[derive(Debug, Clone)]
    pub struct GenerateDiariesResult {
        pub diaries: Vec<DomainDiary>,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct AssignDiaryCommand {
        pub diary_id: String,
        pub vendor_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct BulkAssignCommand {
        pub diary_ids: Vec<String>,
        pub vendor_id: String,
    }

    /// A diary skipped by bulk assignment and the reason it was skipped.
    #[derive(Debug, Clone, PartialEq)]
    pub struct BulkAssignFailure {
        pub diary_id: String,
        pub error: LedgerError,
    }

    #[derive(Debug, Clone)]
    pub struct BulkAssignResult {
        pub assigned: Vec<DomainDiary>,
        pub failed: Vec<BulkAssignFailure>,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct ActivateDiaryCommand {
        pub diary_id: String,
        pub patient_name: String,
    }

    /// Result of any single-diary status change.
    #[derive(Debug, Clone)]
    pub struct DiaryTransitionResult {
        pub diary: DomainDiary,
        pub success_message: String,
    }

    /// Read filter over the ledger. Unset fields match everything.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct DiaryFilter {
        pub diary_type: Option<DiaryType>,
        pub status: Option<DomainDiaryStatus>,
        pub vendor_id: Option<String>,
        /// Case-insensitive
        pub id_substring: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct TypeSummary {
        pub diary_type: DiaryType,
        pub total: usize,
        pub unassigned: usize,
        pub assigned: usize,
        pub active: usize,
        pub inactive: usize,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct InventorySummary {
        pub types: Vec<TypeSummary>,
        pub total: usize,
    }
}

pub mod requests {
    use crate::domain::models::diary::DiaryType;
    use crate::domain::models::request::{DomainDiaryRequest, DomainRequestStatus};

    /// Vendor-submitted restock request.
    #[derive(Debug, Clone)]
    pub struct SubmitRequestCommand {
        pub vendor_id: String,
        pub vendor_name: String,
        pub diary_type: DiaryType,
        pub quantity: i64,
        pub message: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct RejectRequestCommand {
        pub request_id: String,
        pub reason: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CancelRequestCommand {
        pub request_id: String,
        pub vendor_id: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct RequestListQuery {
        pub vendor_id: Option<String>,
        pub status: Option<DomainRequestStatus>,
    }

    #[derive(Debug, Clone)]
    pub struct RequestTransitionResult {
        pub request: DomainDiaryRequest,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct CancelRequestResult {
        pub request: DomainDiaryRequest,
        pub success_message: String,
    }
}

pub mod notifications {
    use crate::domain::models::notification::{DomainNotification, Recipient};

    #[derive(Debug, Clone)]
    pub struct NotificationListQuery {
        pub recipient: Recipient,
        pub unread_only: bool,
    }

    #[derive(Debug, Clone)]
    pub struct NotificationListResult {
        pub notifications: Vec<DomainNotification>,
        pub unread_count: usize,
    }
}
