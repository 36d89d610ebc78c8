use shared::{DiaryRequest, DiaryRequestListRequest, DiaryRequestStatus, SubmitDiaryRequestRequest};

use crate::domain::commands::requests::{RequestListQuery, SubmitRequestCommand};
use crate::domain::error::LedgerResult;
use crate::domain::models::request::{DomainDiaryRequest, DomainRequestStatus};
use crate::io::rest::mappers::diary_mapper::DiaryMapper;

pub struct RequestMapper;

impl RequestMapper {
    pub fn status_to_domain(dto_status: DiaryRequestStatus) -> DomainRequestStatus {
        match dto_status {
            DiaryRequestStatus::Pending => DomainRequestStatus::Pending,
            DiaryRequestStatus::Fulfilled => DomainRequestStatus::Fulfilled,
            DiaryRequestStatus::Rejected => DomainRequestStatus::Rejected,
        }
    }

    pub fn status_to_dto(domain_status: DomainRequestStatus) -> DiaryRequestStatus {
        match domain_status {
            DomainRequestStatus::Pending => DiaryRequestStatus::Pending,
            DomainRequestStatus::Fulfilled => DiaryRequestStatus::Fulfilled,
            DomainRequestStatus::Rejected => DiaryRequestStatus::Rejected,
        }
    }

    pub fn to_dto(domain: DomainDiaryRequest) -> DiaryRequest {
        DiaryRequest {
            id: domain.id,
            vendor_id: domain.vendor_id,
            vendor_name: domain.vendor_name,
            diary_type: domain.diary_type.to_string(),
            quantity: domain.quantity,
            message: domain.message,
            request_date: domain.request_date.to_rfc3339(),
            status: Self::status_to_dto(domain.status),
            fulfilled_date: domain.fulfilled_date.map(|d| d.to_rfc3339()),
            assigned_diary_ids: domain.assigned_diary_ids,
            rejection_reason: domain.rejection_reason,
        }
    }

    pub fn to_dto_list(domain_requests: Vec<DomainDiaryRequest>) -> Vec<DiaryRequest> {
        domain_requests.into_iter().map(Self::to_dto).collect()
    }

    /// Convert a submit DTO to a command; unknown types fail with `InvalidType`
    pub fn to_submit_command(request: SubmitDiaryRequestRequest) -> LedgerResult<SubmitRequestCommand> {
        Ok(SubmitRequestCommand {
            diary_type: DiaryMapper::type_to_domain(&request.diary_type)?,
            vendor_id: request.vendor_id,
            vendor_name: request.vendor_name,
            quantity: request.quantity,
            message: request.message,
        })
    }

    pub fn to_list_query(request: DiaryRequestListRequest) -> RequestListQuery {
        RequestListQuery {
            vendor_id: request.vendor_id,
            status: request.status.map(Self::status_to_domain),
        }
    }
}
