use crate::utils::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    FullName,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Parses `field[,direction]`, e.g. `fullName,desc`.
impl FromStr for SortSpec {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',').map(str::trim);

        let field = match parts.next().unwrap_or_default() {
            f if f.eq_ignore_ascii_case("id") => SortField::Id,
            f if f.eq_ignore_ascii_case("fullName") || f.eq_ignore_ascii_case("full_name") => {
                SortField::FullName
            }
            other => {
                return Err(RegistryError::validation(
                    "sort",
                    format!("Unsupported sort field '{}'. Use id or fullName", other),
                ))
            }
        };

        let direction = match parts.next() {
            None => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(other) => {
                return Err(RegistryError::validation(
                    "sort",
                    format!("Unsupported sort direction '{}'. Use asc or desc", other),
                ))
            }
        };

        if parts.next().is_some() {
            return Err(RegistryError::validation("sort", "Expected field[,direction]"));
        }

        Ok(Self { field, direction })
    }
}

/// Zero-based page request. `page_size` is always at least 1 once it reaches a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
    pub sort: SortSpec,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        self.page_number as usize * self.page_size as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.page_size);
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            content,
            page_number: request.page_number,
            page_size: request.page_size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn try_map<U, F>(self, f: F) -> Result<Page<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        Ok(Page {
            content: self.content.into_iter().map(f).collect::<Result<Vec<U>>>()?,
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        })
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page_number) + 1 >= self.total_pages
    }
}
