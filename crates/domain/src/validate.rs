//! Shared validation helpers.

use uuid::Uuid;
use validator::ValidationError;

use crate::error::DomainError;

/// Validator-crate check: the string must parse as a version-4 UUID.
pub fn uuid_v4(value: &str) -> Result<(), ValidationError> {
    match Uuid::parse_str(value) {
        Ok(uuid) if uuid.get_version_num() == 4 => Ok(()),
        _ => Err(ValidationError::new("uuid_v4")),
    }
}

/// Parses an already-validated key string into a UUID.
pub fn parse_v4_key(value: &str) -> Result<Uuid, DomainError> {
    match Uuid::parse_str(value) {
        Ok(uuid) if uuid.get_version_num() == 4 => Ok(uuid),
        _ => Err(DomainError::InvalidKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_v4_uuid() {
        assert!(uuid_v4("1bc634f1-3a11-41e8-a0a2-58da4717fb7b").is_ok());
    }

    #[test]
    fn rejects_malformed_string() {
        assert!(uuid_v4("not-a-uuid").is_err());
    }

    #[test]
    fn rejects_wrong_uuid_version() {
        // Version 1 UUID: well-formed but not v4.
        assert!(uuid_v4("f47ac10b-58cc-1372-8567-0e02b2c3d479").is_err());
    }
}
