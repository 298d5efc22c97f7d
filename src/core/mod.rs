pub mod commands;
pub mod service;

pub use crate::domain::model::{Address, Practitioner, PractitionerId, Specialty};
pub use crate::domain::page::{Page, PageRequest, SortDirection, SortField, SortSpec};
pub use crate::domain::payload::{ListQuery, RegisterPayload, UpdatePayload};
pub use crate::domain::ports::PractitionerRepository;
pub use crate::domain::projection::{PractitionerListView, RegistrationReceipt};
pub use crate::utils::error::Result;
