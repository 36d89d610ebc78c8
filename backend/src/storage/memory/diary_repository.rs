use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::lock_table;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::diary::{DiaryType, DomainDiary};
use crate::storage::traits::DiaryStorage;

/// Diary rows in append order plus an id index and per-type sequence counters
#[derive(Default)]
pub struct DiaryTable {
    rows: Vec<DomainDiary>,
    index: HashMap<String, usize>,
    sequences: HashMap<DiaryType, u32>,
}

impl DiaryTable {
    fn count_of_type(&self, diary_type: DiaryType) -> u32 {
        self.rows.iter().filter(|d| d.diary_type == diary_type).count() as u32
    }
}

#[derive(Clone)]
pub struct DiaryRepository {
    table: Arc<Mutex<DiaryTable>>,
}

impl DiaryRepository {
    pub fn new(table: Arc<Mutex<DiaryTable>>) -> Self {
        Self { table }
    }
}

impl DiaryStorage for DiaryRepository {
    fn reserve_sequence(&self, diary_type: DiaryType, count: u32) -> LedgerResult<u32> {
        let mut table = lock_table(&self.table)?;
        let issued = table.sequences.get(&diary_type).copied().unwrap_or(0);
        let start = issued.max(table.count_of_type(diary_type)) + 1;
        let last = start
            .checked_add(count.saturating_sub(1))
            .ok_or_else(|| LedgerError::Storage(format!("sequence overflow for {}", diary_type)))?;
        table.sequences.insert(diary_type, last);
        Ok(start)
    }

    fn append_diaries(&self, diaries: &[DomainDiary]) -> LedgerResult<()> {
        let mut table = lock_table(&self.table)?;

        let mut batch_ids = HashSet::with_capacity(diaries.len());
        for diary in diaries {
            if table.index.contains_key(&diary.id) || !batch_ids.insert(diary.id.as_str()) {
                return Err(LedgerError::DuplicateId(diary.id.clone()));
            }
        }

        for diary in diaries {
            if let Ok((_, diary_type, sequence)) = DomainDiary::parse_id(&diary.id) {
                let issued = table.sequences.entry(diary_type).or_insert(0);
                *issued = (*issued).max(sequence);
            }
            let position = table.rows.len();
            table.index.insert(diary.id.clone(), position);
            table.rows.push(diary.clone());
        }
        Ok(())
    }

    fn get_diary(&self, diary_id: &str) -> LedgerResult<Option<DomainDiary>> {
        let table = lock_table(&self.table)?;
        Ok(table.index.get(diary_id).map(|&i| table.rows[i].clone()))
    }

    fn update_diary<F>(&self, diary_id: &str, apply: F) -> LedgerResult<DomainDiary>
    where
        F: FnOnce(&mut DomainDiary) -> LedgerResult<()>,
    {
        let mut table = lock_table(&self.table)?;
        let position = *table
            .index
            .get(diary_id)
            .ok_or_else(|| LedgerError::diary_not_found(diary_id))?;

        let mut updated = table.rows[position].clone();
        apply(&mut updated)?;
        table.rows[position] = updated.clone();
        Ok(updated)
    }

    fn list_diaries(&self) -> LedgerResult<Vec<DomainDiary>> {
        let table = lock_table(&self.table)?;
        Ok(table.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::diary::DomainDiaryStatus;
    use chrono::Utc;

    fn diary(id: &str, diary_type: DiaryType) -> DomainDiary {
        DomainDiary {
            id: id.to_string(),
            diary_type,
            generated_date: Utc::now(),
            status: DomainDiaryStatus::Unassigned,
            assigned_vendor_id: None,
            patient_name: None,
        }
    }

    fn repo() -> DiaryRepository {
        DiaryRepository::new(Arc::new(Mutex::new(DiaryTable::default())))
    }

    #[test]
    fn test_reservations_do_not_overlap() {
        let repo = repo();
        assert_eq!(repo.reserve_sequence(DiaryType::Radiology, 3).unwrap(), 1);
        assert_eq!(repo.reserve_sequence(DiaryType::Radiology, 2).unwrap(), 4);
        // Counters are per type
        assert_eq!(repo.reserve_sequence(DiaryType::FollowUp, 1).unwrap(), 1);
    }

    #[test]
    fn test_reservation_follows_stored_count() {
        let repo = repo();
        repo.append_diaries(&[
            diary("DRY-2025-RD-001", DiaryType::Radiology),
            diary("DRY-2025-RD-002", DiaryType::Radiology),
        ])
        .unwrap();
        assert_eq!(repo.reserve_sequence(DiaryType::Radiology, 1).unwrap(), 3);
    }

    #[test]
    fn test_reservation_skips_appended_sequences() {
        let repo = repo();
        repo.append_diaries(&[diary("DRY-2025-CT-003", DiaryType::Chemotherapy)])
            .unwrap();
        assert_eq!(repo.reserve_sequence(DiaryType::Chemotherapy, 3).unwrap(), 4);
        // A lower imported number does not move the counter back
        repo.append_diaries(&[diary("DRY-2024-CT-002", DiaryType::Chemotherapy)])
            .unwrap();
        assert_eq!(repo.reserve_sequence(DiaryType::Chemotherapy, 1).unwrap(), 7);
    }

    #[test]
    fn test_append_rejects_duplicates_atomically() {
        let repo = repo();
        repo.append_diaries(&[diary("DRY-2025-PO-001", DiaryType::PeriOperative)])
            .unwrap();

        let result = repo.append_diaries(&[
            diary("DRY-2025-PO-002", DiaryType::PeriOperative),
            diary("DRY-2025-PO-001", DiaryType::PeriOperative),
        ]);
        assert_eq!(result, Err(LedgerError::DuplicateId("DRY-2025-PO-001".to_string())));
        assert_eq!(repo.list_diaries().unwrap().len(), 1);
        assert!(repo.get_diary("DRY-2025-PO-002").unwrap().is_none());
    }

    #[test]
    fn test_failed_update_leaves_row_untouched() {
        let repo = repo();
        repo.append_diaries(&[diary("DRY-2025-PO-001", DiaryType::PeriOperative)])
            .unwrap();

        let result = repo.update_diary("DRY-2025-PO-001", |d| {
            d.status = DomainDiaryStatus::Active;
            Err(LedgerError::Storage("boom".to_string()))
        });
        assert!(result.is_err());
        let stored = repo.get_diary("DRY-2025-PO-001").unwrap().unwrap();
        assert_eq!(stored.status, DomainDiaryStatus::Unassigned);
    }

    #[test]
    fn test_update_unknown_diary() {
        let repo = repo();
        let result = repo.update_diary("DRY-2025-PO-404", |_| Ok(()));
        assert_eq!(result, Err(LedgerError::diary_not_found("DRY-2025-PO-404")));
    }
}
