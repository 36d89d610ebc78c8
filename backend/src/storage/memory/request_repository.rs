use std::sync::{Arc, Mutex};

use super::lock_table;
use crate::domain::error::{LedgerError, LedgerResult};
use crate::domain::models::request::DomainDiaryRequest;
use crate::storage::traits::RequestStorage;

/// Requests in submission order
#[derive(Default)]
pub struct RequestTable {
    rows: Vec<DomainDiaryRequest>,
}

impl RequestTable {
    fn position(&self, request_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == request_id)
    }
}

#[derive(Clone)]
pub struct RequestRepository {
    table: Arc<Mutex<RequestTable>>,
}

impl RequestRepository {
    pub fn new(table: Arc<Mutex<RequestTable>>) -> Self {
        Self { table }
    }
}

impl RequestStorage for RequestRepository {
    fn store_request(&self, request: &DomainDiaryRequest) -> LedgerResult<()> {
        let mut table = lock_table(&self.table)?;
        if table.position(&request.id).is_some() {
            return Err(LedgerError::DuplicateId(request.id.clone()));
        }
        table.rows.push(request.clone());
        Ok(())
    }

    fn get_request(&self, request_id: &str) -> LedgerResult<Option<DomainDiaryRequest>> {
        let table = lock_table(&self.table)?;
        Ok(table.position(request_id).map(|i| table.rows[i].clone()))
    }

    fn update_request<F>(&self, request_id: &str, apply: F) -> LedgerResult<DomainDiaryRequest>
    where
        F: FnOnce(&mut DomainDiaryRequest) -> LedgerResult<()>,
    {
        let mut table = lock_table(&self.table)?;
        let position = table
            .position(request_id)
            .ok_or_else(|| LedgerError::request_not_found(request_id))?;

        let mut updated = table.rows[position].clone();
        apply(&mut updated)?;
        table.rows[position] = updated.clone();
        Ok(updated)
    }

    fn remove_request<F>(&self, request_id: &str, check: F) -> LedgerResult<DomainDiaryRequest>
    where
        F: FnOnce(&DomainDiaryRequest) -> LedgerResult<()>,
    {
        let mut table = lock_table(&self.table)?;
        let position = table
            .position(request_id)
            .ok_or_else(|| LedgerError::request_not_found(request_id))?;

        check(&table.rows[position])?;
        Ok(table.rows.remove(position))
    }

    fn list_requests(&self) -> LedgerResult<Vec<DomainDiaryRequest>> {
        let table = lock_table(&self.table)?;
        Ok(table.rows.clone())
    }
}
