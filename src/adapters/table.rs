use crate::domain::model::{Practitioner, PractitionerId};
use crate::domain::page::{Page, PageRequest, SortDirection, SortField, SortSpec};
use crate::domain::ports::Mutation;
use crate::utils::error::{RegistryError, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// The record set shared by every storage backend. Callers serialize access.
#[derive(Debug, Clone)]
pub(crate) struct RecordTable {
    next_id: u64,
    records: BTreeMap<PractitionerId, Practitioner>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

impl RecordTable {
    pub(crate) fn from_records(next_id: u64, practitioners: Vec<Practitioner>) -> Result<Self> {
        let mut records = BTreeMap::new();
        for practitioner in practitioners {
            let id = practitioner.id().ok_or_else(|| RegistryError::StorageError {
                message: format!(
                    "stored practitioner '{}' has no id",
                    practitioner.professional_document()
                ),
            })?;
            if records.insert(id, practitioner).is_some() {
                return Err(RegistryError::StorageError {
                    message: format!("duplicate practitioner id {} in store", id),
                });
            }
        }

        // Never hand out an id that is already taken, even if the counter was lost.
        let floor = records.keys().next_back().map_or(1, |id| id.value() + 1);
        Ok(Self {
            next_id: next_id.max(floor),
            records,
        })
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &Practitioner> {
        self.records.values()
    }

    pub(crate) fn get(&self, id: PractitionerId) -> Result<Practitioner> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFoundError { id })
    }

    pub(crate) fn upsert(&mut self, mut practitioner: Practitioner) -> Result<Practitioner> {
        if let Some(id) = practitioner.id() {
            match self.records.get(&id) {
                None => return Err(RegistryError::NotFoundError { id }),
                // A stale copy must not bring a deactivated record back.
                Some(stored) if !stored.is_active() => {
                    practitioner.deactivate();
                }
                Some(_) => {}
            }
        }

        let document = practitioner.professional_document();
        let collides = self.records.values().any(|other| {
            other.id() != practitioner.id() && other.professional_document() == document
        });
        if collides {
            return Err(RegistryError::ConflictError {
                document: document.to_string(),
            });
        }

        let id = match practitioner.id() {
            Some(id) => id,
            None => {
                let id = PractitionerId::new(self.next_id);
                practitioner.assign_id(id)?;
                self.next_id += 1;
                id
            }
        };

        self.records.insert(id, practitioner.clone());
        Ok(practitioner)
    }

    pub(crate) fn modify(&mut self, id: PractitionerId, mutation: Mutation) -> Result<Practitioner> {
        let mut practitioner = self.get(id)?;
        mutation(&mut practitioner);
        self.upsert(practitioner)
    }

    pub(crate) fn scan_active(&self, request: &PageRequest) -> Page<Practitioner> {
        let mut active: Vec<&Practitioner> = self.records.values().filter(|p| p.is_active()).collect();
        active.sort_by(|a, b| compare(a, b, &request.sort));

        let total = active.len() as u64;
        let content = active
            .into_iter()
            .skip(request.offset())
            .take(request.page_size as usize)
            .cloned()
            .collect();

        Page::new(content, request, total)
    }
}

fn compare(a: &Practitioner, b: &Practitioner, sort: &SortSpec) -> Ordering {
    let ordering = match sort.field {
        SortField::Id => a.id().cmp(&b.id()),
        SortField::FullName => a
            .full_name()
            .to_lowercase()
            .cmp(&b.full_name().to_lowercase())
            .then_with(|| a.id().cmp(&b.id())),
    };

    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::fixtures::practitioner;

    fn request(page_number: u32, page_size: u32, sort: SortSpec) -> PageRequest {
        PageRequest {
            page_number,
            page_size,
            sort,
        }
    }

    #[test]
    fn test_upsert_assigns_increasing_ids() {
        let mut table = RecordTable::default();
        let a = table.upsert(practitioner("Ana", "MD-1001", "Pediatrics")).unwrap();
        let b = table.upsert(practitioner("Luis", "MD-1002", "Cardiology")).unwrap();
        assert_eq!(a.id(), Some(PractitionerId::new(1)));
        assert_eq!(b.id(), Some(PractitionerId::new(2)));
        assert_eq!(table.next_id(), 3);
    }

    #[test]
    fn test_duplicate_document_conflicts() {
        let mut table = RecordTable::default();
        table.upsert(practitioner("Ana", "MD-1001", "Pediatrics")).unwrap();
        let err = table
            .upsert(practitioner("Other", "MD-1001", "Cardiology"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConflictError { .. }));
        assert_eq!(table.records().count(), 1);
        assert_eq!(table.next_id(), 2);
    }

    #[test]
    fn test_resave_same_record_is_not_a_conflict() {
        let mut table = RecordTable::default();
        let mut saved = table.upsert(practitioner("Ana", "MD-1001", "Pediatrics")).unwrap();
        saved.deactivate();
        let resaved = table.upsert(saved).unwrap();
        assert!(!resaved.is_active());
        assert_eq!(table.records().count(), 1);
    }

    #[test]
    fn test_stale_copy_cannot_reactivate() {
        let mut table = RecordTable::default();
        let saved = table.upsert(practitioner("Ana", "MD-1001", "Pediatrics")).unwrap();
        let id = saved.id().unwrap();
        let stale = saved.clone();

        table.modify(id, Box::new(|p: &mut Practitioner| {
            p.deactivate();
        }))
        .unwrap();

        let resaved = table.upsert(stale).unwrap();
        assert!(!resaved.is_active());
        assert!(!table.get(id).unwrap().is_active());
    }

    #[test]
    fn test_modify_applies_to_current_record() {
        let mut table = RecordTable::default();
        let id = table
            .upsert(practitioner("Ana", "MD-1001", "Pediatrics"))
            .unwrap()
            .id()
            .unwrap();

        table.modify(id, Box::new(|p: &mut Practitioner| {
            p.deactivate();
        }))
        .unwrap();
        let modified = table.modify(id, Box::new(|_: &mut Practitioner| {})).unwrap();
        assert!(!modified.is_active());

        assert!(matches!(
            table.modify(PractitionerId::new(9), Box::new(|_: &mut Practitioner| {})),
            Err(RegistryError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_upsert_unknown_id_is_not_found() {
        let mut table = RecordTable::default();
        let mut p = practitioner("Ana", "MD-1001", "Pediatrics");
        p.assign_id(PractitionerId::new(42)).unwrap();
        assert!(matches!(
            table.upsert(p),
            Err(RegistryError::NotFoundError { .. })
        ));
    }

    #[test]
    fn test_scan_excludes_inactive_before_counting() {
        let mut table = RecordTable::default();
        for (i, name) in ["Ana", "Bruno", "Carla", "Diego"].iter().enumerate() {
            let mut saved = table
                .upsert(practitioner(name, &format!("MD-100{}", i), "Pediatrics"))
                .unwrap();
            if i % 2 == 1 {
                saved.deactivate();
                table.upsert(saved).unwrap();
            }
        }

        let page = table.scan_active(&request(0, 5, SortSpec::default()));
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
        assert!(page.content.iter().all(|p| p.is_active()));
    }

    #[test]
    fn test_scan_sorts_and_slices() {
        let mut table = RecordTable::default();
        for (i, name) in ["carla", "Ana", "Bruno"].iter().enumerate() {
            table
                .upsert(practitioner(name, &format!("MD-200{}", i), "Cardiology"))
                .unwrap();
        }

        let by_name = SortSpec::new(SortField::FullName, SortDirection::Asc);
        let first = table.scan_active(&request(0, 2, by_name));
        let names: Vec<&str> = first.content.iter().map(|p| p.full_name()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
        assert_eq!(first.total_pages, 2);

        let second = table.scan_active(&request(1, 2, by_name));
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].full_name(), "carla");

        let past_end = table.scan_active(&request(5, 2, by_name));
        assert!(past_end.content.is_empty());
        assert_eq!(past_end.total_elements, 3);

        let desc = SortSpec::new(SortField::Id, SortDirection::Desc);
        let page = table.scan_active(&request(0, 3, desc));
        assert_eq!(page.content[0].id(), Some(PractitionerId::new(3)));
    }

    #[test]
    fn test_from_records_recovers_counter() {
        let mut table = RecordTable::default();
        table.upsert(practitioner("Ana", "MD-1001", "Pediatrics")).unwrap();
        table.upsert(practitioner("Luis", "MD-1002", "Cardiology")).unwrap();
        let records: Vec<Practitioner> = table.records().cloned().collect();

        let restored = RecordTable::from_records(1, records).unwrap();
        assert_eq!(restored.next_id(), 3);
    }
}
