use crate::domain::model::{Practitioner, PractitionerId};
use crate::domain::page::{Page, PageRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// An in-place change applied to a stored record by [`PractitionerRepository::modify`].
pub type Mutation = Box<dyn FnOnce(&mut Practitioner) + Send>;

/// Storage collaborator for practitioner records.
///
/// Implementations own the durable record and are the only arbiter of write ordering;
/// each call must be atomic on its own.
#[async_trait]
pub trait PractitionerRepository: Send + Sync {
    /// Returns an owned copy of the record, or `NotFoundError`.
    async fn find_by_id(&self, id: PractitionerId) -> Result<Practitioner>;

    /// Active records only, filtered before counting and slicing.
    async fn find_active_paginated(&self, request: &PageRequest) -> Result<Page<Practitioner>>;

    /// Inserts or replaces. Assigns an id on first save and fails with `ConflictError`
    /// when another record already holds the same professional document.
    async fn save(&self, practitioner: Practitioner) -> Result<Practitioner>;

    /// Loads, mutates and persists one record as a single atomic step, so concurrent
    /// mutations of the same id interleave at field level. `NotFoundError` if absent.
    async fn modify(&self, id: PractitionerId, mutation: Mutation) -> Result<Practitioner>;
}

#[async_trait]
impl<R: PractitionerRepository + ?Sized> PractitionerRepository for Arc<R> {
    async fn find_by_id(&self, id: PractitionerId) -> Result<Practitioner> {
        (**self).find_by_id(id).await
    }

    async fn find_active_paginated(&self, request: &PageRequest) -> Result<Page<Practitioner>> {
        (**self).find_active_paginated(request).await
    }

    async fn save(&self, practitioner: Practitioner) -> Result<Practitioner> {
        (**self).save(practitioner).await
    }

    async fn modify(&self, id: PractitionerId, mutation: Mutation) -> Result<Practitioner> {
        (**self).modify(id, mutation).await
    }
}
