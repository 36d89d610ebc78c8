use serde::{Deserialize, Serialize};

/// Diary record as exposed to the dashboard.
///
/// ID format: "DRY-{year}-{type_code}-{seq}" (seq zero-padded to 3 digits)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDiary {
    pub id: String,
    /// Kebab-case diary type, e.g. "peri-operative"
    pub diary_type: String,
    /// Two-letter code derived from the diary type, e.g. "PO"
    pub type_code: String,
    /// RFC 3339 timestamp of generation
    pub generated_date: String,
    pub status: DiaryStatus,
    pub assigned_vendor_id: Option<String>,
    pub patient_name: Option<String>,
}

/// Lifecycle status of a generated diary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaryStatus {
    Unassigned,
    Assigned,
    Active,
    Inactive,
}

/// Request for generating a batch of unassigned diaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateDiariesRequest {
    pub diary_type: String,
    /// Number of diaries to generate (1..=500)
    pub quantity: i64,
}

/// Response after generating diaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateDiariesResponse {
    pub diaries: Vec<GeneratedDiary>,
    pub success_message: String,
}

/// Query parameters for filtering the diary ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryListRequest {
    pub diary_type: Option<String>,
    pub status: Option<DiaryStatus>,
    pub vendor_id: Option<String>,
    /// Case-insensitive substring of the diary ID
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryListResponse {
    pub diaries: Vec<GeneratedDiary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignDiaryRequest {
    pub vendor_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAssignDiariesRequest {
    pub diary_ids: Vec<String>,
    pub vendor_id: String,
}

/// A diary that was skipped during bulk assignment, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAssignFailure {
    pub diary_id: String,
    pub code: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkAssignDiariesResponse {
    pub assigned: Vec<GeneratedDiary>,
    pub failed: Vec<BulkAssignFailure>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateDiaryRequest {
    pub patient_name: String,
}

/// Response after a single-diary status change (assign, unassign, activate, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryResponse {
    pub diary: GeneratedDiary,
    pub success_message: String,
}

/// Inventory counts for one diary type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryTypeSummary {
    pub diary_type: String,
    pub type_code: String,
    pub total: usize,
    pub unassigned: usize,
    pub assigned: usize,
    pub active: usize,
    pub inactive: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummaryResponse {
    pub types: Vec<DiaryTypeSummary>,
    pub total: usize,
}

/// Entry of the enabled-type allowlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryTypeInfo {
    pub diary_type: String,
    pub type_code: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryTypeListResponse {
    pub types: Vec<DiaryTypeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDiaryTypeRequest {
    pub enabled: bool,
}

/// Vendor restock request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRequest {
    pub id: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub diary_type: String,
    pub quantity: u32,
    pub message: Option<String>,
    /// RFC 3339 timestamp of submission
    pub request_date: String,
    pub status: DiaryRequestStatus,
    pub fulfilled_date: Option<String>,
    pub assigned_diary_ids: Option<Vec<String>>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaryRequestStatus {
    Pending,
    Fulfilled,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitDiaryRequestRequest {
    pub vendor_id: String,
    pub vendor_name: String,
    pub diary_type: String,
    pub quantity: i64,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryRequestListRequest {
    pub vendor_id: Option<String>,
    pub status: Option<DiaryRequestStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRequestListResponse {
    pub requests: Vec<DiaryRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RejectDiaryRequestRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelDiaryRequestQuery {
    pub vendor_id: String,
}

/// Response after a request transition (submit, approve, reject)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRequestResponse {
    pub request: DiaryRequest,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelDiaryRequestResponse {
    pub request_id: String,
    pub success_message: String,
}

/// In-app notification addressed to the admin role or a single vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// "admin" or "vendor:<vendor id>"
    pub recipient: String,
    pub severity: NotificationSeverity,
    pub message: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListRequest {
    pub recipient: String,
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreadCountRequest {
    pub recipient: String,
}

/// Badge count for the dashboard bell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub recipient: String,
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAllNotificationsReadRequest {
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkNotificationsReadResponse {
    pub updated_count: usize,
    pub success_message: String,
}

/// Log line relayed from the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

/// JSON error body returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
