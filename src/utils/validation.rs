//! Centralized validation for names that end up on disk.

/// Maximum length of a sequence name in bytes (common filesystem limit)
pub const MAX_NAME_LENGTH: usize = 255;

/// File name of the catalog index at the storage root
pub const INDEX_FILE_NAME: &str = "index.json";

/// Name validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty sequence name provided")]
    EmptyName,
    #[error("Sequence name too long: exceeds {MAX_NAME_LENGTH} bytes")]
    NameTooLong,
    #[error("Invalid sequence name '{0}': must be a single path component")]
    InvalidName(String),
    #[error("Sequence name '{0}' is reserved")]
    ReservedName(String),
}

/// Validate that a sequence name can be used as a directory under the storage root.
///
/// Rejects:
/// - empty or whitespace-only names
/// - names longer than [`MAX_NAME_LENGTH`] bytes
/// - path separators, `.` and `..` (directory traversal)
/// - NUL and other control characters
/// - the index file name, which lives next to the sequence directories
///
/// # Examples
///
/// ```
/// use sequence_catalog::utils::validation::validate_sequence_name;
///
/// assert!(validate_sequence_name("trip1").is_ok());
/// assert!(validate_sequence_name("../etc").is_err());
/// ```
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first rule the name breaks.
pub fn validate_sequence_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }

    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(ValidationError::InvalidName(name.to_string()));
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidName(name.escape_debug().to_string()));
    }

    if name.eq_ignore_ascii_case(INDEX_FILE_NAME) {
        return Err(ValidationError::ReservedName(name.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["trip1", "Trip 2", "2015-06-01_scan", "été", ".hidden"] {
            assert!(validate_sequence_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_empty_names() {
        assert_eq!(validate_sequence_name(""), Err(ValidationError::EmptyName));
        assert_eq!(validate_sequence_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_traversal_blocked() {
        let attempts = ["..", ".", "a/b", "..\\windows", "../etc/passwd"];
        for attempt in attempts {
            assert!(
                matches!(
                    validate_sequence_name(attempt),
                    Err(ValidationError::InvalidName(_))
                ),
                "'{attempt}' should have been blocked"
            );
        }
    }

    #[test]
    fn test_control_characters_blocked() {
        assert!(validate_sequence_name("trip\0").is_err());
        assert!(validate_sequence_name("trip\n1").is_err());
    }

    #[test]
    fn test_length_limit() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validate_sequence_name(&long), Err(ValidationError::NameTooLong));
        assert!(validate_sequence_name(&"a".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_index_name_reserved() {
        assert!(matches!(
            validate_sequence_name("index.json"),
            Err(ValidationError::ReservedName(_))
        ));
        assert!(matches!(
            validate_sequence_name("INDEX.JSON"),
            Err(ValidationError::ReservedName(_))
        ));
    }
}
