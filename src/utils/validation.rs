use crate::utils::error::{RegistryError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| RegistryError::validation(field_name, "Field is required"))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_pattern(field_name: &str, value: &str, pattern: &Regex, expected: &str) -> Result<()> {
    if !pattern.is_match(value) {
        return Err(RegistryError::validation(
            field_name,
            format!("'{}' does not match the expected format ({})", value, expected),
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let mut parts = value.split('@');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.trim().is_empty() && !domain.trim().is_empty(),
        _ => false,
    };

    if !valid {
        return Err(RegistryError::validation(
            field_name,
            format!("'{}' is not a valid e-mail address", value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RegistryError::validation(
            field_name,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_field() {
        let present = Some("Ana".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("fullName", &present).unwrap(), "Ana");
        assert!(validate_required_field("fullName", &missing).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("fullName", "Ana Ruiz").is_ok());
        assert!(validate_non_empty_string("fullName", "").is_err());
        assert!(validate_non_empty_string("fullName", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "ana@clinic.example").is_ok());
        assert!(validate_email("email", "ana.clinic.example").is_err());
        assert!(validate_email("email", "@clinic").is_err());
        assert!(validate_email("email", "a@b@c").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("pagination.default_page_size", 5, 1, 50).is_ok());
        assert!(validate_range("pagination.default_page_size", 0, 1, 50).is_err());
        assert!(validate_range("pagination.default_page_size", 51, 1, 50).is_err());
    }
}
