use crate::core::{
    ListQuery, Page, PageRequest, Practitioner, PractitionerId, PractitionerListView,
    PractitionerRepository, RegisterPayload, RegistrationReceipt, UpdatePayload,
};
use crate::utils::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationSettings {
    pub fn resolve(&self, query: &ListQuery) -> Result<PageRequest> {
        let requested = query.page_size.unwrap_or(self.default_page_size);
        if requested == 0 {
            return Err(RegistryError::validation(
                "pageSize",
                "Page size must be at least 1",
            ));
        }

        let page_size = requested.min(self.max_page_size);
        if page_size < requested {
            tracing::debug!(
                "Requested page size {} clamped to {}",
                requested,
                page_size
            );
        }

        Ok(PageRequest {
            page_number: query.page_number.unwrap_or(0),
            page_size,
            sort: query.sort.unwrap_or_default(),
        })
    }
}

/// Orchestrates the practitioner lifecycle: validate, build or mutate the entity, persist.
///
/// Holds no locks of its own; atomicity of each write is up to the repository.
pub struct PractitionerService<R: PractitionerRepository> {
    repository: R,
    pagination: PaginationSettings,
}

impl<R: PractitionerRepository> PractitionerService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_pagination(repository, PaginationSettings::default())
    }

    pub fn with_pagination(repository: R, pagination: PaginationSettings) -> Self {
        Self {
            repository,
            pagination,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<RegistrationReceipt> {
        let data = payload.into_validated().inspect_err(|e| rejected("register", e))?;

        let saved = self
            .repository
            .save(Practitioner::create(data))
            .await
            .inspect_err(|e| rejected("register", e))?;

        let receipt = RegistrationReceipt::for_practitioner(&saved)?;
        tracing::info!(
            "✅ Registered practitioner {} ({})",
            receipt.id,
            saved.professional_document()
        );
        Ok(receipt)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<PractitionerListView>> {
        let request = self
            .pagination
            .resolve(query)
            .inspect_err(|e| rejected("list", e))?;

        let page = self.repository.find_active_paginated(&request).await?;
        tracing::debug!(
            "Listed page {} ({} of {} active practitioners)",
            page.page_number,
            page.content.len(),
            page.total_elements
        );

        page.try_map(|practitioner| PractitionerListView::try_from(&practitioner))
    }

    pub async fn update(&self, payload: UpdatePayload) -> Result<()> {
        let update = payload.into_validated().inspect_err(|e| rejected("update", e))?;
        let id = update.id();

        if update.is_empty() {
            self.repository
                .find_by_id(id)
                .await
                .inspect_err(|e| rejected("update", e))?;
            tracing::debug!("Update for practitioner {} carries no changes", id);
            return Ok(());
        }

        self.repository
            .modify(
                id,
                Box::new(move |practitioner: &mut Practitioner| practitioner.apply_update(&update)),
            )
            .await
            .inspect_err(|e| rejected("update", e))?;

        tracing::info!("✏️ Updated practitioner {}", id);
        Ok(())
    }

    /// Safe to repeat: an already inactive record stays inactive and the call succeeds.
    pub async fn deactivate(&self, id: PractitionerId) -> Result<()> {
        self.repository
            .modify(
                id,
                Box::new(|practitioner: &mut Practitioner| {
                    practitioner.deactivate();
                }),
            )
            .await
            .inspect_err(|e| rejected("deactivate", e))?;

        tracing::info!("🛑 Practitioner {} is inactive", id);
        Ok(())
    }
}

fn rejected(operation: &str, error: &RegistryError) {
    if error.is_client_error() {
        tracing::warn!("⚠️ {} rejected: {}", operation, error);
    } else {
        tracing::error!("❌ {} failed: {}", operation, error);
    }
}
