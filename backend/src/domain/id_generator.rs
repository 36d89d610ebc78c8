//! Diary identifier generation.
//!
//! IDs look like `DRY-2025-PO-001`: the current year, the two-letter type
//! code and a per-type sequence number padded to three digits. A batch
//! reserves its whole run of sequence numbers in one storage call, so
//! concurrent batches for the same type can never hand out the same number.

use chrono::Datelike;
use std::sync::Arc;
use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::diary_catalog::DiaryTypeCatalog;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::diary::{DiaryType, DomainDiary};
use crate::storage::{Connection, DiaryStorage};

/// Largest batch a single generate or request may ask for
pub const MAX_BATCH_QUANTITY: i64 = 500;

/// A reserved run of diary IDs
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryIdBatch {
    pub diary_type: DiaryType,
    pub first_sequence: u32,
    pub ids: Vec<String>,
}

/// Check a requested quantity against 1..=500
pub fn validate_quantity(quantity: i64) -> LedgerResult<u32> {
    if !(1..=MAX_BATCH_QUANTITY).contains(&quantity) {
        return Err(LedgerError::InvalidQuantity(quantity));
    }
    Ok(quantity as u32)
}

#[derive(Clone)]
pub struct DiaryIdGenerator<C: Connection> {
    diary_repository: C::DiaryRepository,
    catalog: DiaryTypeCatalog,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> DiaryIdGenerator<C> {
    pub fn new(connection: &C, catalog: DiaryTypeCatalog, clock: Arc<dyn Clock>) -> Self {
        Self {
            diary_repository: connection.create_diary_repository(),
            catalog,
            clock,
        }
    }

    /// Reserve `quantity` fresh IDs for an enabled diary type
    pub fn generate(&self, diary_type: DiaryType, quantity: i64) -> LedgerResult<DiaryIdBatch> {
        if !self.catalog.is_enabled(diary_type)? {
            return Err(LedgerError::InvalidType(diary_type.to_string()));
        }
        let quantity = validate_quantity(quantity)?;

        let year = self.clock.now().year();
        let first_sequence = self.diary_repository.reserve_sequence(diary_type, quantity)?;
        let ids = (0..quantity)
            .map(|offset| DomainDiary::generate_id(year, diary_type, first_sequence + offset))
            .collect();

        debug!(
            "Reserved {} {} IDs starting at sequence {}",
            quantity, diary_type, first_sequence
        );

        Ok(DiaryIdBatch {
            diary_type,
            first_sequence,
            ids,
        })
    }
}
