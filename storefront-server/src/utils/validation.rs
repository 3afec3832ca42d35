//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits match what the order form and admin UI enforce client-side;
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names (order form)
pub const MAX_NAME_LEN: usize = 100;

/// Entity names: product, variant size/color, channel labels
pub const MAX_ENTITY_NAME_LEN: usize = 200;

/// Notes on orders and sales
pub const MAX_NOTE_LEN: usize = 1000;

/// Short identifiers: phone, SKU
pub const MAX_PHONE_LEN: usize = 20;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Shipping addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text_length() {
        let long = Some("x".repeat(MAX_PHONE_LEN + 1));
        assert!(validate_optional_text(&long, "phone", MAX_PHONE_LEN).is_err());
        assert!(validate_optional_text(&None, "phone", MAX_PHONE_LEN).is_ok());
    }
}
