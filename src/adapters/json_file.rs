use crate::adapters::table::RecordTable;
use crate::domain::model::{Practitioner, PractitionerId};
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::{Mutation, PractitionerRepository};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    next_id: u64,
    updated_at: DateTime<Utc>,
    practitioners: Vec<Practitioner>,
}

/// Keeps the whole registry in one JSON document, rewritten on every save.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    table: Mutex<RecordTable>,
}

impl JsonFileRepository {
    /// Loads `path`, or starts empty if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let table = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                tracing::debug!(
                    "Loaded {} practitioner records from {}",
                    snapshot.practitioners.len(),
                    path.display()
                );
                RecordTable::from_records(snapshot.next_id, snapshot.practitioners)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", path.display());
                RecordTable::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, table: &RecordTable) -> Result<()> {
        let snapshot = Snapshot {
            next_id: table.next_id(),
            updated_at: Utc::now(),
            practitioners: table.records().cloned().collect(),
        };
        let data = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write aside and rename so readers never see a half-written file.
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, &data).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl PractitionerRepository for JsonFileRepository {
    async fn find_by_id(&self, id: PractitionerId) -> Result<Practitioner> {
        self.table.lock().await.get(id)
    }

    async fn find_active_paginated(&self, request: &PageRequest) -> Result<Page<Practitioner>> {
        Ok(self.table.lock().await.scan_active(request))
    }

    async fn save(&self, practitioner: Practitioner) -> Result<Practitioner> {
        let mut table = self.table.lock().await;

        // Stage the change so a failed write leaves memory and disk in agreement.
        let mut staged = table.clone();
        let saved = staged.upsert(practitioner)?;
        self.persist(&staged).await?;
        *table = staged;

        Ok(saved)
    }

    async fn modify(&self, id: PractitionerId, mutation: Mutation) -> Result<Practitioner> {
        let mut table = self.table.lock().await;

        let mut staged = table.clone();
        let saved = staged.modify(id, mutation)?;
        self.persist(&staged).await?;
        *table = staged;

        Ok(saved)
    }
}
