//! Field-level request validation shared by every resource service.

use crate::error::AppError;
use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;

pub const MAX_TEXT_LENGTH: usize = 255;

fn telephone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9+()\- ]{7,20}$").expect("static telephone pattern"))
}

/// Non-blank after trimming and at most `MAX_TEXT_LENGTH` characters.
pub fn text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Non-blank, allowed characters only, and at least one digit.
pub fn telephone(value: &str, field: &str) -> Result<(), AppError> {
    text(value, field)?;
    if !telephone_pattern().is_match(value) || !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(format!("{} does not match required pattern", field)));
    }
    Ok(())
}

pub fn at_least<T: PartialOrd + Display>(value: T, min: T, field: &str) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
    }
    Ok(())
}

pub fn positive<T: PartialOrd + Display + Default>(value: T, field: &str) -> Result<(), AppError> {
    if value <= T::default() {
        return Err(AppError::Validation(format!("{} must be greater than 0", field)));
    }
    Ok(())
}

pub fn in_range<T: PartialOrd + Display>(value: T, min: T, max: T, field: &str) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::Validation(format!("{} must be between {} and {}", field, min, max)));
    }
    Ok(())
}

/// `lower <= upper`, reported against the field names.
pub fn not_greater<T: PartialOrd>(lower: T, lower_field: &str, upper: T, upper_field: &str) -> Result<(), AppError> {
    if lower > upper {
        return Err(AppError::Validation(format!(
            "{} must not be greater than {}",
            lower_field, upper_field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rejects_blank_and_overlong() {
        assert!(text("Acme", "company_name").is_ok());
        assert!(text("   ", "company_name").is_err());
        assert!(text(&"a".repeat(MAX_TEXT_LENGTH), "company_name").is_ok());
        assert!(text(&"a".repeat(MAX_TEXT_LENGTH + 1), "company_name").is_err());
    }

    #[test]
    fn telephone_accepts_common_formats() {
        assert!(telephone("+54 (11) 4555-1234", "telephone").is_ok());
        assert!(telephone("1234567", "telephone").is_ok());
        assert!(telephone("123", "telephone").is_err());
        assert!(telephone("call me", "telephone").is_err());
    }

    #[test]
    fn telephone_rejects_blank_and_digitless() {
        let err = telephone("        ", "telephone").unwrap_err();
        assert_eq!(err.to_string(), "validation: telephone must not be blank");
        assert!(telephone("-------", "telephone").is_err());
        assert!(telephone("( ) + - ()", "telephone").is_err());
    }

    #[test]
    fn numeric_bounds() {
        assert!(positive(1_i64, "cid").is_ok());
        assert!(positive(0_i64, "cid").is_err());
        assert!(positive(0.0_f64, "width").is_err());
        assert!(at_least(0, 0, "minimum_capacity").is_ok());
        assert!(at_least(-1, 0, "minimum_capacity").is_err());
        assert!(in_range(23, 0, 23, "manufacturing_hour").is_ok());
        assert!(in_range(24, 0, 23, "manufacturing_hour").is_err());
        assert!(not_greater(5, "current_capacity", 10, "maximum_capacity").is_ok());
        let err = not_greater(11, "current_capacity", 10, "maximum_capacity").unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation: current_capacity must not be greater than maximum_capacity"
        );
    }
}
