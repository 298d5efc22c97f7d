use crate::domain::payload::{NewPractitioner, PractitionerUpdate};
use crate::utils::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PractitionerId(u64);

impl PractitionerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PractitionerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    Orthopedics,
    Cardiology,
    Gynecology,
    Pediatrics,
}

impl Specialty {
    pub const ALL: [Specialty; 4] = [
        Specialty::Orthopedics,
        Specialty::Cardiology,
        Specialty::Gynecology,
        Specialty::Pediatrics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Cardiology => "Cardiology",
            Specialty::Gynecology => "Gynecology",
            Specialty::Pediatrics => "Pediatrics",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Specialty::ALL
            .into_iter()
            .find(|specialty| specialty.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Specialty::ALL.iter().map(|s| s.as_str()).collect();
                RegistryError::validation(
                    "specialty",
                    format!("Unknown specialty '{}'. Recognized: {}", wanted, known.join(", ")),
                )
            })
    }
}

/// Postal address. Every part is optional; updates merge field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
}

impl Address {
    pub fn merge(&mut self, update: &Address) {
        fn overwrite(target: &mut Option<String>, source: &Option<String>) {
            if let Some(value) = source {
                *target = Some(value.clone());
            }
        }

        overwrite(&mut self.street, &update.street);
        overwrite(&mut self.number, &update.number);
        overwrite(&mut self.district, &update.district);
        overwrite(&mut self.city, &update.city);
        overwrite(&mut self.complement, &update.complement);
    }
}

/// A registry record for one medical practitioner.
///
/// `id` and `professional_document` are fixed once set. `active` only ever moves from
/// `true` to `false`; there is no way back through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    id: Option<PractitionerId>,
    full_name: String,
    professional_document: String,
    specialty: Specialty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contact_phone: Option<String>,
    #[serde(default)]
    address: Address,
    active: bool,
}

impl Practitioner {
    pub fn create(data: NewPractitioner) -> Self {
        Self {
            id: None,
            full_name: data.full_name,
            professional_document: data.professional_document,
            specialty: data.specialty,
            email: data.email,
            contact_phone: data.contact_phone,
            address: data.address,
            active: true,
        }
    }

    pub fn id(&self) -> Option<PractitionerId> {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn professional_document(&self) -> &str {
        &self.professional_document
    }

    pub fn specialty(&self) -> Specialty {
        self.specialty
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn contact_phone(&self) -> Option<&str> {
        self.contact_phone.as_deref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Called by storage on first save.
    pub fn assign_id(&mut self, id: PractitionerId) -> Result<()> {
        match self.id {
            None => {
                self.id = Some(id);
                Ok(())
            }
            Some(existing) if existing == id => Ok(()),
            Some(existing) => Err(RegistryError::StorageError {
                message: format!(
                    "practitioner {} cannot be re-identified as {}",
                    existing, id
                ),
            }),
        }
    }

    /// Overwrites only the profile fields present in `update`.
    pub fn apply_update(&mut self, update: &PractitionerUpdate) {
        if let Some(full_name) = &update.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(specialty) = update.specialty {
            self.specialty = specialty;
        }
        if let Some(contact_phone) = &update.contact_phone {
            self.contact_phone = Some(contact_phone.clone());
        }
        if let Some(address) = &update.address {
            self.address.merge(address);
        }
    }

    /// Returns `true` if the record was active before the call.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
