//! Field constraints checked before a form may be submitted.
//!
//! These are client-side gates only. The server remains the final authority
//! and may still reject a record that passes here.

use core::fmt;

use thiserror::Error;

use crate::entities::CustomerAddress;

/// Maximum postcode length.
pub const POSTCODE_MAX_LENGTH: usize = 10;

/// Maximum country code length (ISO 3166-1 alpha-2).
pub const COUNTRY_MAX_LENGTH: usize = 2;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is missing or empty.
    #[error("{field} is required")]
    Required {
        /// Field name.
        field: &'static str,
    },
    /// The field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
}

impl ValidationError {
    /// Name of the field that failed.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::TooLong { field, .. } => *field,
        }
    }
}

/// Every constraint that failed for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Whether no constraint failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The failed constraints in field order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether the named field has at least one failure.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    fn push(&mut self, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.0.push(error);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Require a non-empty value.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] for `None` or an empty string.
pub fn required(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ValidationError::Required { field }),
    }
}

/// Limit a value to `max` characters. An absent value passes.
///
/// # Errors
///
/// Returns [`ValidationError::TooLong`] when the value has more than `max`
/// characters.
pub fn max_length(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

/// Check the constraints of a [`CustomerAddress`] form.
///
/// # Errors
///
/// Returns every failure when `postcode` or `country` is missing or too long.
pub fn validate_customer_address(address: &CustomerAddress) -> Result<(), ValidationErrors> {
    let postcode = address.postcode.as_deref();
    let country = address.country.as_deref();

    let mut errors = ValidationErrors::default();
    errors.push(required("postcode", postcode));
    errors.push(max_length("postcode", postcode, POSTCODE_MAX_LENGTH));
    errors.push(required("country", country));
    errors.push(max_length("country", country, COUNTRY_MAX_LENGTH));
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(postcode: Option<&str>, country: Option<&str>) -> CustomerAddress {
        CustomerAddress {
            postcode: postcode.map(String::from),
            country: country.map(String::from),
            ..CustomerAddress::default()
        }
    }

    #[test]
    fn test_valid_address() {
        assert!(validate_customer_address(&address(Some("20121"), Some("IT"))).is_ok());
        assert!(validate_customer_address(&address(Some("1234567890"), Some("D"))).is_ok());
    }

    #[test]
    fn test_blank_address_requires_postcode_and_country() {
        let errors = validate_customer_address(&CustomerAddress::default()).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::Required { field: "postcode" },
                ValidationError::Required { field: "country" },
            ]
        );
        assert_eq!(errors.to_string(), "postcode is required; country is required");
    }

    #[test]
    fn test_empty_string_is_missing() {
        let errors = validate_customer_address(&address(Some(""), Some("IT"))).unwrap_err();
        assert!(errors.has_field("postcode"));
        assert!(!errors.has_field("country"));
    }

    #[test]
    fn test_too_long_fields() {
        let errors = validate_customer_address(&address(Some("12345678901"), Some("ITA"))).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::TooLong { field: "postcode", max: 10 },
                ValidationError::TooLong { field: "country", max: 2 },
            ]
        );
    }

    #[test]
    fn test_max_length_counts_characters() {
        assert!(max_length("country", Some("ÖÄ"), COUNTRY_MAX_LENGTH).is_ok());
        assert!(max_length("country", None, COUNTRY_MAX_LENGTH).is_ok());
    }
}
