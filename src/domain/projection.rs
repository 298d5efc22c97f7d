use crate::domain::model::{Practitioner, PractitionerId, Specialty};
use crate::utils::error::RegistryError;
use serde::{Deserialize, Serialize};

/// Listing shape; contact and address details are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerListView {
    pub id: PractitionerId,
    pub full_name: String,
    pub professional_document: String,
    pub specialty: Specialty,
}

/// Confirmation returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub id: PractitionerId,
    pub message: String,
}

impl RegistrationReceipt {
    pub fn for_practitioner(practitioner: &Practitioner) -> Result<Self, RegistryError> {
        let view = PractitionerListView::try_from(practitioner)?;
        Ok(Self {
            id: view.id,
            message: format!(
                "Practitioner {} registered with document {}",
                view.full_name, view.professional_document
            ),
        })
    }
}

impl TryFrom<&Practitioner> for PractitionerListView {
    type Error = RegistryError;

    fn try_from(practitioner: &Practitioner) -> Result<Self, Self::Error> {
        let id = practitioner.id().ok_or_else(|| RegistryError::StorageError {
            message: format!(
                "stored practitioner '{}' has no id",
                practitioner.professional_document()
            ),
        })?;

        Ok(Self {
            id,
            full_name: practitioner.full_name().to_string(),
            professional_document: practitioner.professional_document().to_string(),
            specialty: practitioner.specialty(),
        })
    }
}
