//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a required label is not empty or whitespace-only.
///
/// Team names stay free text on purpose (the standings normalizer copes
/// with messy input), but a blank name would produce an unusable record.
pub fn validate_nonblank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("nonblank");
        err.message = Some("value must not be blank".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_nonblank_valid() {
        assert!(validate_nonblank("Football").is_ok());
        assert!(validate_nonblank(" TY CS ").is_ok());
    }

    #[test]
    fn test_validate_nonblank_invalid() {
        assert!(validate_nonblank("").is_err());
        assert!(validate_nonblank("   ").is_err());
        assert!(validate_nonblank("\t\n").is_err());
    }
}
