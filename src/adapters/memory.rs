use crate::adapters::table::RecordTable;
use crate::domain::model::{Practitioner, PractitionerId};
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{Mutation, PractitionerRepository};
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-local store; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    table: Mutex<RecordTable>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, active or not, ordered by id.
    pub async fn snapshot(&self) -> Vec<Practitioner> {
        self.table.lock().await.records().cloned().collect()
    }
}

#[async_trait]
impl PractitionerRepository for InMemoryRepository {
    async fn find_by_id(&self, id: PractitionerId) -> Result<Practitioner> {
        self.table.lock().await.get(id)
    }

    async fn find_active_paginated(&self, request: &PageRequest) -> Result<Page<Practitioner>> {
        Ok(self.table.lock().await.scan_active(request))
    }

    async fn save(&self, practitioner: Practitioner) -> Result<Practitioner> {
        self.table.lock().await.upsert(practitioner)
    }

    async fn modify(&self, id: PractitionerId, mutation: Mutation) -> Result<Practitioner> {
        self.table.lock().await.modify(id, mutation)
    }
}
