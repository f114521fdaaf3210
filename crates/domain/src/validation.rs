//! Field-level validation for request payloads
//!
//! Validators accumulate every violation instead of stopping at the first one,
//! so a caller sees the whole list for a rejected request.

use std::fmt;

use crate::GatewayError;

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `order_items[0].product.name`
    pub field: String,
    /// Human-readable violation
    pub message: String,
}

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Every violation found
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one field violation
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), message: message.into() });
    }

    /// `true` when no violation was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Require `value.chars().count() <= max`.
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add_field_error(field, format!("must be at most {max} characters"));
        }
    }

    /// Require `value.chars().count() >= min`.
    pub fn min_len(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add_field_error(field, format!("must be at least {min} characters"));
        }
    }

    /// Require exactly `len` characters.
    pub fn exact_len(&mut self, field: &str, value: &str, len: usize) {
        if value.chars().count() != len {
            self.add_field_error(field, format!("must be exactly {len} characters"));
        }
    }

    /// Optional variant of [`ValidationError::max_len`].
    pub fn max_len_opt(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.max_len(field, value, max);
        }
    }

    /// Require `value >= min` when present.
    pub fn min_value_opt(&mut self, field: &str, value: Option<i64>, min: i64) {
        if let Some(value) = value {
            if value < min {
                self.add_field_error(field, format!("must be greater than or equal to {min}"));
            }
        }
    }

    /// Merge errors of a nested value under `prefix`.
    pub fn nested(&mut self, prefix: &str, inner: ValidationError) {
        for err in inner.errors {
            self.add_field_error(format!("{prefix}.{}", err.field), err.message);
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> =
            self.errors.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&rendered.join("; "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for GatewayError {
    fn from(err: ValidationError) -> Self {
        GatewayError::InvalidInput(err.to_string())
    }
}

/// Types that can check their own fields
pub trait Validate {
    /// Collect every violation of this value.
    ///
    /// # Errors
    /// Returns all field errors found.
    fn validate(&self) -> Result<(), ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_rules_count_characters() {
        let mut errors = ValidationError::new();
        errors.max_len("name", "가나다", 3);
        errors.exact_len("zipcode", "06236", 5);
        errors.min_len("tracking", "123456789", 10);
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].field, "tracking");
    }

    #[test]
    fn test_nested_prefixes_fields() {
        let mut inner = ValidationError::new();
        inner.add_field_error("name", "required");
        let mut outer = ValidationError::new();
        outer.nested("order_items[0].product", inner);
        assert_eq!(outer.errors[0].field, "order_items[0].product.name");
    }

    #[test]
    fn test_converts_to_invalid_input() {
        let mut errors = ValidationError::new();
        errors.min_value_opt("quantity", Some(0), 1);
        let err: GatewayError = errors.into_result().unwrap_err().into();
        assert!(matches!(err, GatewayError::InvalidInput(ref msg) if msg.contains("quantity")));
    }
}
