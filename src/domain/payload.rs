//! Inbound payloads and the checks they must pass before reaching the entity.
//!
//! Every payload field is optional at the decode level so that a missing field is reported
//! as a validation failure naming that field.

use crate::domain::model::{Address, PractitionerId, Specialty};
use crate::domain::page::SortSpec;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_pattern, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const DOCUMENT_FORMAT: &str = "optional 2-4 letter prefix and dash, then 4-6 digits, e.g. MD-1001";

static DOCUMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z]{2,4}-)?\d{4,6}$").expect("professional document pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub professional_document: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    #[serde(default)]
    pub id: Option<PractitionerId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// Listing parameters; anything left out falls back to the service's pagination settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

/// Registration data that has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPractitioner {
    pub(crate) full_name: String,
    pub(crate) professional_document: String,
    pub(crate) specialty: Specialty,
    pub(crate) email: Option<String>,
    pub(crate) contact_phone: Option<String>,
    pub(crate) address: Address,
}

/// A partial update that has passed validation. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PractitionerUpdate {
    pub(crate) id: PractitionerId,
    pub(crate) full_name: Option<String>,
    pub(crate) specialty: Option<Specialty>,
    pub(crate) contact_phone: Option<String>,
    pub(crate) address: Option<Address>,
}

impl PractitionerUpdate {
    pub fn id(&self) -> PractitionerId {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.specialty.is_none()
            && self.contact_phone.is_none()
            && self.address.is_none()
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| v.trim().to_string())
}

fn validate_optional_non_empty(field_name: &str, value: &Option<String>) -> Result<()> {
    match value {
        Some(v) => validate_non_empty_string(field_name, v),
        None => Ok(()),
    }
}

impl Validate for RegisterPayload {
    fn validate(&self) -> Result<()> {
        let full_name = validate_required_field("fullName", &self.full_name)?;
        validate_non_empty_string("fullName", full_name)?;

        let document = validate_required_field("professionalDocument", &self.professional_document)?;
        validate_pattern(
            "professionalDocument",
            document.trim(),
            &DOCUMENT_PATTERN,
            DOCUMENT_FORMAT,
        )?;

        let specialty = validate_required_field("specialty", &self.specialty)?;
        specialty.parse::<Specialty>()?;

        if let Some(email) = &self.email {
            validate_email("email", email.trim())?;
        }
        validate_optional_non_empty("contactPhone", &self.contact_phone)?;

        Ok(())
    }
}

impl RegisterPayload {
    pub fn into_validated(self) -> Result<NewPractitioner> {
        self.validate()?;

        let specialty = self
            .specialty
            .as_deref()
            .ok_or_else(|| RegistryError::validation("specialty", "Field is required"))?
            .parse()?;

        Ok(NewPractitioner {
            full_name: trimmed(&self.full_name).unwrap_or_default(),
            professional_document: trimmed(&self.professional_document).unwrap_or_default(),
            specialty,
            email: trimmed(&self.email),
            contact_phone: trimmed(&self.contact_phone),
            address: self.address.unwrap_or_default(),
        })
    }
}

impl Validate for UpdatePayload {
    fn validate(&self) -> Result<()> {
        validate_required_field("id", &self.id)?;
        validate_optional_non_empty("fullName", &self.full_name)?;
        if let Some(specialty) = &self.specialty {
            specialty.parse::<Specialty>()?;
        }
        validate_optional_non_empty("contactPhone", &self.contact_phone)?;
        Ok(())
    }
}

impl UpdatePayload {
    pub fn into_validated(self) -> Result<PractitionerUpdate> {
        self.validate()?;

        let id = *validate_required_field("id", &self.id)?;
        let specialty = self
            .specialty
            .as_deref()
            .map(str::parse::<Specialty>)
            .transpose()?;

        Ok(PractitionerUpdate {
            id,
            full_name: trimmed(&self.full_name),
            specialty,
            contact_phone: trimmed(&self.contact_phone),
            address: self.address,
        })
    }
}
