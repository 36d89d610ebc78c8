//! Inventory ledger domain logic.
//!
//! Owns every generated diary and enforces its status transitions:
//!
//! ```text
//! unassigned --assign--> assigned --activate--> active --deactivate--> inactive
//!      ^                    |
//!      +-----unassign-------+
//! ```
//!
//! Diaries created by fulfilling a vendor request skip `unassigned` and enter
//! the ledger already assigned. An active diary is in use by a patient and
//! can no longer be unassigned.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::inventory::{
    ActivateDiaryCommand, AssignDiaryCommand, BulkAssignCommand, BulkAssignFailure,
    BulkAssignResult, DiaryFilter, DiaryTransitionResult, GenerateDiariesCommand,
    GenerateDiariesResult, InventorySummary, TypeSummary,
};
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::id_generator::{DiaryIdBatch, DiaryIdGenerator};
use crate::domain::models::diary::{DiaryType, DomainDiary, DomainDiaryStatus};
use crate::domain::models::notification::{Recipient, Severity};
use crate::domain::notification_service::NotificationService;
use crate::storage::{Connection, DiaryStorage};

#[derive(Clone)]
pub struct InventoryService<C: Connection> {
    diary_repository: C::DiaryRepository,
    id_generator: DiaryIdGenerator<C>,
    notification_service: NotificationService<C>,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> InventoryService<C> {
    pub fn new(
        connection: &C,
        id_generator: DiaryIdGenerator<C>,
        notification_service: NotificationService<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            diary_repository: connection.create_diary_repository(),
            id_generator,
            notification_service,
            clock,
        }
    }

    /// Generate a batch of unassigned diaries and add them to the ledger
    pub fn generate_diaries(&self, command: GenerateDiariesCommand) -> LedgerResult<GenerateDiariesResult> {
        info!("Generating {} {} diaries", command.quantity, command.diary_type);

        let batch = self.id_generator.generate(command.diary_type, command.quantity)?;
        let diaries = self.build_diaries(batch, None);
        let diaries = self.append(diaries)?;

        let success_message = match diaries.len() {
            1 => format!("1 {} diary generated", command.diary_type),
            n => format!("{} {} diaries generated", n, command.diary_type),
        };
        info!("{}", success_message);

        Ok(GenerateDiariesResult {
            diaries,
            success_message,
        })
    }

    /// Generate diaries that go straight to `vendor_id` (request fulfilment)
    pub(crate) fn generate_for_vendor(
        &self,
        diary_type: DiaryType,
        quantity: u32,
        vendor_id: &str,
    ) -> LedgerResult<Vec<DomainDiary>> {
        let batch = self.id_generator.generate(diary_type, i64::from(quantity))?;
        let diaries = self.build_diaries(batch, Some(vendor_id));
        self.append(diaries)
    }

    /// Add new records to the ledger.
    ///
    /// Records must be fresh: either unassigned with no vendor, or assigned
    /// with a vendor and no patient. Each ID must be a well-formed diary ID
    /// whose type code matches the record's type.
    pub fn append(&self, batch: Vec<DomainDiary>) -> LedgerResult<Vec<DomainDiary>> {
        for diary in &batch {
            let (_, id_type, _) = DomainDiary::parse_id(&diary.id)
                .map_err(|reason| transition_error(diary, "append", &reason))?;
            if id_type != diary.diary_type {
                let reason = format!(
                    "ID type code {} does not match diary type {}",
                    id_type.code(),
                    diary.diary_type
                );
                return Err(transition_error(diary, "append", &reason));
            }

            let fresh = match diary.status {
                DomainDiaryStatus::Unassigned => diary.assigned_vendor_id.is_none(),
                DomainDiaryStatus::Assigned => diary.assigned_vendor_id.is_some(),
                DomainDiaryStatus::Active | DomainDiaryStatus::Inactive => false,
            };
            if !fresh || diary.patient_name.is_some() {
                return Err(transition_error(
                    diary,
                    "append",
                    "new diaries must be unassigned, or assigned to a vendor",
                ));
            }
        }

        self.diary_repository.append_diaries(&batch)?;
        debug!("Appended {} diaries to the ledger", batch.len());
        Ok(batch)
    }

    pub fn get_diary(&self, diary_id: &str) -> LedgerResult<DomainDiary> {
        self.diary_repository
            .get_diary(diary_id)?
            .ok_or_else(|| LedgerError::diary_not_found(diary_id))
    }

    /// Assign an unassigned diary to a vendor and notify the vendor
    pub fn assign(&self, command: AssignDiaryCommand) -> LedgerResult<DiaryTransitionResult> {
        info!("Assigning diary {} to vendor {}", command.diary_id, command.vendor_id);

        let diary = match self.assign_one(&command.diary_id, &command.vendor_id) {
            Ok(diary) => diary,
            Err(e) => {
                warn!("Assign of diary {} rejected: {}", command.diary_id, e);
                return Err(e);
            }
        };

        Ok(DiaryTransitionResult {
            success_message: format!("Diary {} assigned to vendor {}", diary.id, command.vendor_id.trim()),
            diary,
        })
    }

    /// Assign every listed diary that is still unassigned.
    ///
    /// Partial success: diaries that cannot be assigned are reported in
    /// `failed` with the reason, the rest are assigned and notified.
    /// A storage failure stops the batch; the diaries assigned before it are
    /// still returned and every remaining id is reported as failed.
    pub fn bulk_assign(&self, command: BulkAssignCommand) -> LedgerResult<BulkAssignResult> {
        info!(
            "Bulk assigning {} diaries to vendor {}",
            command.diary_ids.len(),
            command.vendor_id
        );
        let vendor_id = require_vendor_id(&command.vendor_id, "bulk-assign")?;

        let mut assigned = Vec::new();
        let mut failed = Vec::new();
        for (position, diary_id) in command.diary_ids.iter().enumerate() {
            match self.assign_one(diary_id, vendor_id) {
                Ok(diary) => assigned.push(diary),
                Err(error @ LedgerError::Storage(_)) => {
                    error!("Bulk assign stopped at diary {}: {}", diary_id, error);
                    failed.extend(command.diary_ids[position..].iter().map(|id| BulkAssignFailure {
                        diary_id: id.clone(),
                        error: error.clone(),
                    }));
                    break;
                }
                Err(error) => {
                    warn!("Skipping diary {} in bulk assign: {}", diary_id, error);
                    failed.push(BulkAssignFailure {
                        diary_id: diary_id.clone(),
                        error,
                    });
                }
            }
        }

        let success_message = format!(
            "{} of {} diaries assigned to vendor {}",
            assigned.len(),
            command.diary_ids.len(),
            vendor_id
        );
        info!("{}", success_message);

        Ok(BulkAssignResult {
            assigned,
            failed,
            success_message,
        })
    }

    /// Return an assigned (not yet active) diary to the unassigned pool
    pub fn unassign(&self, diary_id: &str) -> LedgerResult<DiaryTransitionResult> {
        info!("Unassigning diary {}", diary_id);

        let diary = self.diary_repository.update_diary(diary_id, |diary| {
            match diary.status {
                DomainDiaryStatus::Assigned => {}
                DomainDiaryStatus::Unassigned => {
                    return Err(transition_error(diary, "unassign", "diary is not assigned"))
                }
                DomainDiaryStatus::Active => {
                    return Err(transition_error(
                        diary,
                        "unassign",
                        "diary is active and in use by a patient",
                    ))
                }
                DomainDiaryStatus::Inactive => {
                    return Err(transition_error(diary, "unassign", "diary is inactive"))
                }
            }
            diary.status = DomainDiaryStatus::Unassigned;
            diary.assigned_vendor_id = None;
            Ok(())
        })?;

        Ok(DiaryTransitionResult {
            success_message: format!("Diary {} returned to inventory", diary.id),
            diary,
        })
    }

    /// Move an assigned diary to a different vendor and notify the new vendor
    pub fn reassign(&self, command: AssignDiaryCommand) -> LedgerResult<DiaryTransitionResult> {
        info!("Reassigning diary {} to vendor {}", command.diary_id, command.vendor_id);
        let vendor_id = require_vendor_id(&command.vendor_id, "reassign")?;

        let diary = self.diary_repository.update_diary(&command.diary_id, |diary| {
            if diary.status != DomainDiaryStatus::Assigned {
                let reason = format!("diary is {}", diary.status);
                return Err(transition_error(diary, "reassign", &reason));
            }
            if diary.assigned_vendor_id.as_deref() == Some(vendor_id) {
                return Err(transition_error(
                    diary,
                    "reassign",
                    "diary is already assigned to this vendor",
                ));
            }
            diary.assigned_vendor_id = Some(vendor_id.to_string());
            Ok(())
        })?;

        self.notify_assigned(&diary, vendor_id)?;

        Ok(DiaryTransitionResult {
            success_message: format!("Diary {} reassigned to vendor {}", diary.id, vendor_id),
            diary,
        })
    }

    /// Mark an assigned diary as in use by a patient
    pub fn activate(&self, command: ActivateDiaryCommand) -> LedgerResult<DiaryTransitionResult> {
        info!("Activating diary {}", command.diary_id);
        let patient_name = command.patient_name.trim();

        let diary = self.diary_repository.update_diary(&command.diary_id, |diary| {
            if diary.status != DomainDiaryStatus::Assigned {
                let reason = format!("diary is {}", diary.status);
                return Err(transition_error(diary, "activate", &reason));
            }
            if patient_name.is_empty() {
                return Err(transition_error(diary, "activate", "patient name is required"));
            }
            diary.status = DomainDiaryStatus::Active;
            diary.patient_name = Some(patient_name.to_string());
            Ok(())
        })?;

        Ok(DiaryTransitionResult {
            success_message: format!("Diary {} activated for {}", diary.id, patient_name),
            diary,
        })
    }

    /// Retire an active diary
    pub fn deactivate(&self, diary_id: &str) -> LedgerResult<DiaryTransitionResult> {
        info!("Deactivating diary {}", diary_id);

        let diary = self.diary_repository.update_diary(diary_id, |diary| {
            if diary.status != DomainDiaryStatus::Active {
                let reason = format!("diary is {}", diary.status);
                return Err(transition_error(diary, "deactivate", &reason));
            }
            diary.status = DomainDiaryStatus::Inactive;
            Ok(())
        })?;

        Ok(DiaryTransitionResult {
            success_message: format!("Diary {} deactivated", diary.id),
            diary,
        })
    }

    /// Matching diaries in ledger (append) order
    pub fn filter(&self, filter: &DiaryFilter) -> LedgerResult<Vec<DomainDiary>> {
        let needle = filter
            .id_substring
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_uppercase);

        let diaries: Vec<DomainDiary> = self
            .diary_repository
            .list_diaries()?
            .into_iter()
            .filter(|d| filter.diary_type.map_or(true, |t| d.diary_type == t))
            .filter(|d| filter.status.map_or(true, |s| d.status == s))
            .filter(|d| {
                filter
                    .vendor_id
                    .as_deref()
                    .map_or(true, |v| d.assigned_vendor_id.as_deref() == Some(v))
            })
            .filter(|d| {
                needle
                    .as_deref()
                    .map_or(true, |n| d.id.to_ascii_uppercase().contains(n))
            })
            .collect();

        debug!("Filter {:?} matched {} diaries", filter, diaries.len());
        Ok(diaries)
    }

    /// Per-type counts by status, optionally limited to one vendor's diaries
    pub fn summary(&self, vendor_id: Option<&str>) -> LedgerResult<InventorySummary> {
        let diaries = self.filter(&DiaryFilter {
            vendor_id: vendor_id.map(str::to_string),
            ..Default::default()
        })?;

        let types: Vec<TypeSummary> = DiaryType::ALL
            .into_iter()
            .map(|diary_type| {
                let of_type = || diaries.iter().filter(move |d| d.diary_type == diary_type);
                let with_status =
                    |status: DomainDiaryStatus| of_type().filter(|d| d.status == status).count();
                TypeSummary {
                    diary_type,
                    total: of_type().count(),
                    unassigned: with_status(DomainDiaryStatus::Unassigned),
                    assigned: with_status(DomainDiaryStatus::Assigned),
                    active: with_status(DomainDiaryStatus::Active),
                    inactive: with_status(DomainDiaryStatus::Inactive),
                }
            })
            .collect();

        Ok(InventorySummary {
            total: diaries.len(),
            types,
        })
    }

    fn assign_one(&self, diary_id: &str, vendor_id: &str) -> LedgerResult<DomainDiary> {
        let vendor_id = require_vendor_id(vendor_id, "assign")?;

        let diary = self.diary_repository.update_diary(diary_id, |diary| {
            if diary.status != DomainDiaryStatus::Unassigned {
                let reason = format!("diary is already {}", diary.status);
                return Err(transition_error(diary, "assign", &reason));
            }
            diary.status = DomainDiaryStatus::Assigned;
            diary.assigned_vendor_id = Some(vendor_id.to_string());
            Ok(())
        })?;

        if let Err(notify_error) = self.notify_assigned(&diary, vendor_id) {
            self.revert_assignment(&diary.id, vendor_id);
            return Err(notify_error);
        }
        Ok(diary)
    }

    /// Undo an assignment whose vendor notification could not be recorded
    fn revert_assignment(&self, diary_id: &str, vendor_id: &str) {
        let reverted = self.diary_repository.update_diary(diary_id, |diary| {
            if diary.status == DomainDiaryStatus::Assigned
                && diary.assigned_vendor_id.as_deref() == Some(vendor_id)
            {
                diary.status = DomainDiaryStatus::Unassigned;
                diary.assigned_vendor_id = None;
            }
            Ok(())
        });
        if let Err(e) = reverted {
            error!("Diary {} left assigned to {} after failed notification: {}", diary_id, vendor_id, e);
        }
    }

    fn notify_assigned(&self, diary: &DomainDiary, vendor_id: &str) -> LedgerResult<()> {
        self.notification_service.notify(
            Recipient::Vendor(vendor_id.to_string()),
            Severity::Info,
            format!("Diary {} ({}) has been assigned to you", diary.id, diary.diary_type),
        )?;
        Ok(())
    }

    fn build_diaries(&self, batch: DiaryIdBatch, vendor_id: Option<&str>) -> Vec<DomainDiary> {
        let generated_date = self.clock.now();
        let status = if vendor_id.is_some() {
            DomainDiaryStatus::Assigned
        } else {
            DomainDiaryStatus::Unassigned
        };

        batch
            .ids
            .into_iter()
            .map(|id| DomainDiary {
                id,
                diary_type: batch.diary_type,
                generated_date,
                status,
                assigned_vendor_id: vendor_id.map(str::to_string),
                patient_name: None,
            })
            .collect()
    }
}

fn transition_error(diary: &DomainDiary, action: &'static str, reason: &str) -> LedgerError {
    LedgerError::InvalidTransition {
        entity: "diary",
        id: diary.id.clone(),
        action,
        reason: reason.to_string(),
    }
}

fn require_vendor_id<'a>(vendor_id: &'a str, action: &'static str) -> LedgerResult<&'a str> {
    let trimmed = vendor_id.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidTransition {
            entity: "vendor",
            id: String::new(),
            action,
            reason: "vendor id is required".to_string(),
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::notifications::NotificationListQuery;
    use crate::storage::memory::test_utils::TestEnvironment;
    use std::collections::HashSet;
    use std::thread;

    fn generate(env: &TestEnvironment, diary_type: DiaryType, quantity: i64) -> Vec<DomainDiary> {
        env.inventory_service
            .generate_diaries(GenerateDiariesCommand {
                diary_type,
                quantity,
            })
            .unwrap()
            .diaries
    }

    fn vendor_notifications(env: &TestEnvironment, vendor_id: &str) -> usize {
        env.notification_service
            .list(NotificationListQuery {
                recipient: Recipient::Vendor(vendor_id.to_string()),
                unread_only: false,
            })
            .unwrap()
            .notifications
            .len()
    }

    fn assign(env: &TestEnvironment, diary_id: &str, vendor_id: &str) -> LedgerResult<DiaryTransitionResult> {
        env.inventory_service.assign(AssignDiaryCommand {
            diary_id: diary_id.to_string(),
            vendor_id: vendor_id.to_string(),
        })
    }

    #[test]
    fn test_generate_assign_and_unassign_scenario() {
        let env = TestEnvironment::new();

        let diaries = generate(&env, DiaryType::PeriOperative, 3);
        let ids: Vec<String> = diaries.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec!["DRY-2025-PO-001", "DRY-2025-PO-002", "DRY-2025-PO-003"]);
        assert!(diaries.iter().all(|d| d.status == DomainDiaryStatus::Unassigned));
        assert!(diaries.iter().all(|d| d.generated_date == env.now()));

        let result = env
            .inventory_service
            .bulk_assign(BulkAssignCommand {
                diary_ids: ids.clone(),
                vendor_id: "V001".to_string(),
            })
            .unwrap();
        assert_eq!(result.assigned.len(), 3);
        assert!(result.failed.is_empty());
        assert!(result.assigned.iter().all(|d| {
            d.status == DomainDiaryStatus::Assigned && d.assigned_vendor_id.as_deref() == Some("V001")
        }));
        assert_eq!(vendor_notifications(&env, "V001"), 3);

        env.inventory_service
            .activate(ActivateDiaryCommand {
                diary_id: ids[0].clone(),
                patient_name: "Asha Rao".to_string(),
            })
            .unwrap();

        let err = env.inventory_service.unassign(&ids[0]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransition { action: "unassign", .. }));
        let still_active = env.inventory_service.get_diary(&ids[0]).unwrap();
        assert_eq!(still_active.status, DomainDiaryStatus::Active);
        assert_eq!(still_active.assigned_vendor_id.as_deref(), Some("V001"));
    }

    #[test]
    fn test_assign_twice_fails_and_leaves_state() {
        let env = TestEnvironment::new();
        let diary = generate(&env, DiaryType::Radiology, 1).remove(0);

        let result = assign(&env, &diary.id, "V001").unwrap();
        assert_eq!(result.diary.status, DomainDiaryStatus::Assigned);
        assert_eq!(result.diary.assigned_vendor_id.as_deref(), Some("V001"));
        assert_eq!(vendor_notifications(&env, "V001"), 1);

        let err = assign(&env, &diary.id, "V002").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransition { action: "assign", .. }));

        let stored = env.inventory_service.get_diary(&diary.id).unwrap();
        assert_eq!(stored.assigned_vendor_id.as_deref(), Some("V001"));
        assert_eq!(vendor_notifications(&env, "V001"), 1);
        assert_eq!(vendor_notifications(&env, "V002"), 0);
    }

    #[test]
    fn test_assign_unknown_diary() {
        let env = TestEnvironment::new();
        assert_eq!(
            assign(&env, "DRY-2025-PO-404", "V001").unwrap_err(),
            LedgerError::diary_not_found("DRY-2025-PO-404")
        );
    }

    #[test]
    fn test_assign_requires_vendor() {
        let env = TestEnvironment::new();
        let diary = generate(&env, DiaryType::FollowUp, 1).remove(0);
        assert!(matches!(
            assign(&env, &diary.id, "  ").unwrap_err(),
            LedgerError::InvalidTransition { entity: "vendor", .. }
        ));
        let stored = env.inventory_service.get_diary(&diary.id).unwrap();
        assert_eq!(stored.status, DomainDiaryStatus::Unassigned);
    }

    #[test]
    fn test_bulk_assign_reports_skipped_ids() {
        let env = TestEnvironment::new();
        let diaries = generate(&env, DiaryType::FollowUp, 3);
        assign(&env, &diaries[1].id, "V009").unwrap();

        let result = env
            .inventory_service
            .bulk_assign(BulkAssignCommand {
                diary_ids: vec![
                    diaries[0].id.clone(),
                    diaries[1].id.clone(),
                    "DRY-2025-FU-999".to_string(),
                    diaries[2].id.clone(),
                ],
                vendor_id: "V001".to_string(),
            })
            .unwrap();

        let assigned: Vec<&str> = result.assigned.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(assigned, vec![diaries[0].id.as_str(), diaries[2].id.as_str()]);

        assert_eq!(result.failed.len(), 2);
        assert_eq!(result.failed[0].diary_id, diaries[1].id);
        assert!(matches!(result.failed[0].error, LedgerError::InvalidTransition { .. }));
        assert_eq!(result.failed[1].diary_id, "DRY-2025-FU-999");
        assert!(matches!(result.failed[1].error, LedgerError::NotFound { .. }));
        assert_eq!(result.success_message, "2 of 4 diaries assigned to vendor V001");
        assert_eq!(vendor_notifications(&env, "V001"), 2);
    }

    #[test]
    fn test_unassign_assigned_diary() {
        let env = TestEnvironment::new();
        let diary = generate(&env, DiaryType::PostOperative, 1).remove(0);

        assert!(matches!(
            env.inventory_service.unassign(&diary.id).unwrap_err(),
            LedgerError::InvalidTransition { .. }
        ));

        assign(&env, &diary.id, "V001").unwrap();
        let result = env.inventory_service.unassign(&diary.id).unwrap();
        assert_eq!(result.diary.status, DomainDiaryStatus::Unassigned);
        assert_eq!(result.diary.assigned_vendor_id, None);

        // Back in the pool, so it can go to another vendor
        assign(&env, &diary.id, "V002").unwrap();
    }

    #[test]
    fn test_reassign_moves_vendor() {
        let env = TestEnvironment::new();
        let diary = generate(&env, DiaryType::Chemotherapy, 1).remove(0);
        assign(&env, &diary.id, "V001").unwrap();

        let result = env
            .inventory_service
            .reassign(AssignDiaryCommand {
                diary_id: diary.id.clone(),
                vendor_id: "V002".to_string(),
            })
            .unwrap();
        assert_eq!(result.diary.assigned_vendor_id.as_deref(), Some("V002"));
        assert_eq!(result.diary.status, DomainDiaryStatus::Assigned);
        assert_eq!(vendor_notifications(&env, "V002"), 1);

        let same_vendor = env.inventory_service.reassign(AssignDiaryCommand {
            diary_id: diary.id.clone(),
            vendor_id: "V002".to_string(),
        });
        assert!(matches!(same_vendor, Err(LedgerError::InvalidTransition { .. })));
    }

    #[test]
    fn test_activation_lifecycle() {
        let env = TestEnvironment::new();
        let diary = generate(&env, DiaryType::Radiology, 1).remove(0);

        let not_assigned = env.inventory_service.activate(ActivateDiaryCommand {
            diary_id: diary.id.clone(),
            patient_name: "Lee".to_string(),
        });
        assert!(matches!(not_assigned, Err(LedgerError::InvalidTransition { .. })));

        assign(&env, &diary.id, "V001").unwrap();
        let blank_name = env.inventory_service.activate(ActivateDiaryCommand {
            diary_id: diary.id.clone(),
            patient_name: "   ".to_string(),
        });
        assert!(matches!(blank_name, Err(LedgerError::InvalidTransition { .. })));

        let active = env
            .inventory_service
            .activate(ActivateDiaryCommand {
                diary_id: diary.id.clone(),
                patient_name: "  Lee Chen ".to_string(),
            })
            .unwrap();
        assert_eq!(active.diary.status, DomainDiaryStatus::Active);
        assert_eq!(active.diary.patient_name.as_deref(), Some("Lee Chen"));

        let inactive = env.inventory_service.deactivate(&diary.id).unwrap();
        assert_eq!(inactive.diary.status, DomainDiaryStatus::Inactive);
        assert_eq!(inactive.diary.patient_name.as_deref(), Some("Lee Chen"));

        // Inactive is terminal
        assert!(env.inventory_service.deactivate(&diary.id).is_err());
        assert!(env.inventory_service.unassign(&diary.id).is_err());
        assert!(assign(&env, &diary.id, "V002").is_err());
    }

    #[test]
    fn test_filter_is_ordered_and_repeatable() {
        let env = TestEnvironment::new();
        generate(&env, DiaryType::PeriOperative, 2);
        let radiology = generate(&env, DiaryType::Radiology, 2);
        generate(&env, DiaryType::PeriOperative, 1);
        assign(&env, &radiology[1].id, "V001").unwrap();

        let all = env.inventory_service.filter(&DiaryFilter::default()).unwrap();
        let ids: Vec<&str> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "DRY-2025-PO-001",
                "DRY-2025-PO-002",
                "DRY-2025-RD-001",
                "DRY-2025-RD-002",
                "DRY-2025-PO-003",
            ]
        );

        let filter = DiaryFilter {
            diary_type: Some(DiaryType::PeriOperative),
            status: Some(DomainDiaryStatus::Unassigned),
            ..Default::default()
        };
        let first = env.inventory_service.filter(&filter).unwrap();
        let second = env.inventory_service.filter(&filter).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);

        let by_vendor = env
            .inventory_service
            .filter(&DiaryFilter {
                vendor_id: Some("V001".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_vendor.len(), 1);
        assert_eq!(by_vendor[0].id, "DRY-2025-RD-002");

        let by_search = env
            .inventory_service
            .filter(&DiaryFilter {
                id_substring: Some("rd-00".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_search.len(), 2);
    }

    #[test]
    fn test_summary_counts() {
        let env = TestEnvironment::new();
        let diaries = generate(&env, DiaryType::PeriOperative, 3);
        generate(&env, DiaryType::Radiology, 1);
        assign(&env, &diaries[0].id, "V001").unwrap();
        assign(&env, &diaries[1].id, "V002").unwrap();

        let summary = env.inventory_service.summary(None).unwrap();
        assert_eq!(summary.total, 4);
        let peri = &summary.types[0];
        assert_eq!(peri.diary_type, DiaryType::PeriOperative);
        assert_eq!((peri.total, peri.unassigned, peri.assigned), (3, 1, 2));
        assert_eq!(summary.types[4].total, 1);

        let vendor = env.inventory_service.summary(Some("V001")).unwrap();
        assert_eq!(vendor.total, 1);
        assert_eq!(vendor.types[0].assigned, 1);
    }

    #[test]
    fn test_append_rejects_used_records() {
        let env = TestEnvironment::new();
        let record = DomainDiary {
            id: "DRY-2025-PO-050".to_string(),
            diary_type: DiaryType::PeriOperative,
            generated_date: env.now(),
            status: DomainDiaryStatus::Active,
            assigned_vendor_id: Some("V001".to_string()),
            patient_name: Some("Someone".to_string()),
        };
        assert!(matches!(
            env.inventory_service.append(vec![record]),
            Err(LedgerError::InvalidTransition { action: "append", .. })
        ));
    }

    #[test]
    fn test_assign_rolls_back_when_notification_store_fails() {
        let env = TestEnvironment::new();
        generate(&env, DiaryType::PeriOperative, 1);
        env.connection.poison_notifications();

        let result = assign(&env, "DRY-2025-PO-001", "V001");
        assert!(matches!(result, Err(LedgerError::Storage(_))));
        let diary = env.inventory_service.get_diary("DRY-2025-PO-001").unwrap();
        assert_eq!(diary.status, DomainDiaryStatus::Unassigned);
        assert_eq!(diary.assigned_vendor_id, None);
    }

    #[test]
    fn test_bulk_assign_storage_failure_reports_remaining_ids() {
        let env = TestEnvironment::new();
        generate(&env, DiaryType::FollowUp, 2);
        env.connection.poison_notifications();

        let result = env
            .inventory_service
            .bulk_assign(BulkAssignCommand {
                diary_ids: vec!["DRY-2025-FU-001".to_string(), "DRY-2025-FU-002".to_string()],
                vendor_id: "V001".to_string(),
            })
            .unwrap();
        assert!(result.assigned.is_empty());
        let failed: Vec<&str> = result.failed.iter().map(|f| f.diary_id.as_str()).collect();
        assert_eq!(failed, vec!["DRY-2025-FU-001", "DRY-2025-FU-002"]);
        assert!(result
            .failed
            .iter()
            .all(|f| matches!(f.error, LedgerError::Storage(_))));
        assert_eq!(result.success_message, "0 of 2 diaries assigned to vendor V001");
        let unassigned = env
            .inventory_service
            .filter(&DiaryFilter {
                status: Some(DomainDiaryStatus::Unassigned),
                ..DiaryFilter::default()
            })
            .unwrap();
        assert_eq!(unassigned.len(), 2);
    }

    #[test]
    fn test_append_rejects_malformed_and_mismatched_ids() {
        let env = TestEnvironment::new();
        let record = |id: &str, diary_type| DomainDiary {
            id: id.to_string(),
            diary_type,
            generated_date: env.now(),
            status: DomainDiaryStatus::Unassigned,
            assigned_vendor_id: None,
            patient_name: None,
        };

        for bad in [
            record("hello", DiaryType::PeriOperative),
            record("DRY-2025-PO-001", DiaryType::Radiology),
        ] {
            assert!(matches!(
                env.inventory_service.append(vec![bad]),
                Err(LedgerError::InvalidTransition { action: "append", .. })
            ));
        }
        assert!(env.inventory_service.filter(&DiaryFilter::default()).unwrap().is_empty());

        let generated = generate(&env, DiaryType::PeriOperative, 1);
        assert_eq!(generated[0].id, "DRY-2025-PO-001");
    }

    #[test]
    fn test_append_with_gap_then_generate_continues_after_it() {
        let env = TestEnvironment::new();
        let imported = DomainDiary {
            id: "DRY-2025-CT-003".to_string(),
            diary_type: DiaryType::Chemotherapy,
            generated_date: env.now(),
            status: DomainDiaryStatus::Unassigned,
            assigned_vendor_id: None,
            patient_name: None,
        };
        env.inventory_service.append(vec![imported]).unwrap();

        let ids: Vec<String> = generate(&env, DiaryType::Chemotherapy, 3)
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["DRY-2025-CT-004", "DRY-2025-CT-005", "DRY-2025-CT-006"]);
    }

    #[test]
    fn test_append_then_generate_skips_taken_sequences() {
        let env = TestEnvironment::new();
        let imported = DomainDiary {
            id: "DRY-2025-CT-001".to_string(),
            diary_type: DiaryType::Chemotherapy,
            generated_date: env.now(),
            status: DomainDiaryStatus::Unassigned,
            assigned_vendor_id: None,
            patient_name: None,
        };
        env.inventory_service.append(vec![imported]).unwrap();

        let generated = generate(&env, DiaryType::Chemotherapy, 1);
        assert_eq!(generated[0].id, "DRY-2025-CT-002");
    }

    #[test]
    fn test_concurrent_generation_never_collides() {
        let env = TestEnvironment::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = env.inventory_service.clone();
                thread::spawn(move || {
                    let mut ids = Vec::new();
                    for _ in 0..10 {
                        let result = service
                            .generate_diaries(GenerateDiariesCommand {
                                diary_type: DiaryType::FollowUp,
                                quantity: 5,
                            })
                            .unwrap();
                        ids.extend(result.diaries.into_iter().map(|d| d.id));
                    }
                    ids
                })
            })
            .collect();

        let mut all_ids = Vec::new();
        for handle in handles {
            all_ids.extend(handle.join().unwrap());
        }
        let distinct: HashSet<&String> = all_ids.iter().collect();
        assert_eq!(all_ids.len(), 400);
        assert_eq!(distinct.len(), 400);

        // The sequence numbers form exactly 1..=400
        let mut sequences: Vec<u32> = all_ids
            .iter()
            .map(|id| DomainDiary::parse_id(id).unwrap().2)
            .collect();
        sequences.sort_unstable();
        assert_eq!(sequences, (1..=400).collect::<Vec<u32>>());
    }
}
