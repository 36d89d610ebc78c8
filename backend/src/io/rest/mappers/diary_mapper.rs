use shared::{
    BulkAssignDiariesResponse, BulkAssignFailure, DiaryListRequest, DiaryStatus, DiaryTypeInfo,
    DiaryTypeSummary, GeneratedDiary, InventorySummaryResponse,
};

use crate::domain::commands::inventory::{
    BulkAssignResult, DiaryFilter, InventorySummary, TypeSummary,
};
use crate::domain::diary_catalog::DiaryTypeEntry;
use crate::domain::error::LedgerResult;
use crate::domain::models::diary::{DiaryType, DomainDiary, DomainDiaryStatus};

pub struct DiaryMapper;

impl DiaryMapper {
    /// Convert shared DiaryStatus to domain DomainDiaryStatus
    pub fn status_to_domain(dto_status: DiaryStatus) -> DomainDiaryStatus {
        match dto_status {
            DiaryStatus::Unassigned => DomainDiaryStatus::Unassigned,
            DiaryStatus::Assigned => DomainDiaryStatus::Assigned,
            DiaryStatus::Active => DomainDiaryStatus::Active,
            DiaryStatus::Inactive => DomainDiaryStatus::Inactive,
        }
    }

    /// Convert domain DomainDiaryStatus to shared DiaryStatus
    pub fn status_to_dto(domain_status: DomainDiaryStatus) -> DiaryStatus {
        match domain_status {
            DomainDiaryStatus::Unassigned => DiaryStatus::Unassigned,
            DomainDiaryStatus::Assigned => DiaryStatus::Assigned,
            DomainDiaryStatus::Active => DiaryStatus::Active,
            DomainDiaryStatus::Inactive => DiaryStatus::Inactive,
        }
    }

    /// Parse a wire diary type; unknown names are `InvalidType`
    pub fn type_to_domain(dto_type: &str) -> LedgerResult<DiaryType> {
        dto_type.parse()
    }

    pub fn to_dto(domain: DomainDiary) -> GeneratedDiary {
        GeneratedDiary {
            type_code: domain.type_code().to_string(),
            id: domain.id,
            diary_type: domain.diary_type.to_string(),
            generated_date: domain.generated_date.to_rfc3339(),
            status: Self::status_to_dto(domain.status),
            assigned_vendor_id: domain.assigned_vendor_id,
            patient_name: domain.patient_name,
        }
    }

    pub fn to_dto_list(domain_diaries: Vec<DomainDiary>) -> Vec<GeneratedDiary> {
        domain_diaries.into_iter().map(Self::to_dto).collect()
    }

    /// Convert list query parameters to a domain filter
    pub fn to_filter(request: DiaryListRequest) -> LedgerResult<DiaryFilter> {
        Ok(DiaryFilter {
            diary_type: request
                .diary_type
                .as_deref()
                .map(Self::type_to_domain)
                .transpose()?,
            status: request.status.map(Self::status_to_domain),
            vendor_id: request.vendor_id,
            id_substring: request.search,
        })
    }

    pub fn to_bulk_assign_response(result: BulkAssignResult) -> BulkAssignDiariesResponse {
        BulkAssignDiariesResponse {
            assigned: Self::to_dto_list(result.assigned),
            failed: result
                .failed
                .into_iter()
                .map(|failure| BulkAssignFailure {
                    code: failure.error.code().to_string(),
                    reason: failure.error.to_string(),
                    diary_id: failure.diary_id,
                })
                .collect(),
            success_message: result.success_message,
        }
    }

    fn type_summary_to_dto(summary: TypeSummary) -> DiaryTypeSummary {
        DiaryTypeSummary {
            diary_type: summary.diary_type.to_string(),
            type_code: summary.diary_type.code().to_string(),
            total: summary.total,
            unassigned: summary.unassigned,
            assigned: summary.assigned,
            active: summary.active,
            inactive: summary.inactive,
        }
    }

    pub fn to_summary_response(summary: InventorySummary) -> InventorySummaryResponse {
        InventorySummaryResponse {
            types: summary
                .types
                .into_iter()
                .map(Self::type_summary_to_dto)
                .collect(),
            total: summary.total,
        }
    }

    pub fn type_entry_to_dto(entry: DiaryTypeEntry) -> DiaryTypeInfo {
        DiaryTypeInfo {
            diary_type: entry.diary_type.to_string(),
            type_code: entry.diary_type.code().to_string(),
            enabled: entry.enabled,
        }
    }
}
