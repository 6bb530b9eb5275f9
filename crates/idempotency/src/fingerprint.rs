//! Logical fingerprint of a retryable request.

use sha2::{Digest, Sha256};

/// SHA-256 digest of an operation scope and the raw request payload.
///
/// The scope keeps identical bodies sent to different operations from
/// colliding (e.g. an order create and a user create with the same
/// bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derives a fingerprint from the raw payload bytes of a request.
    pub fn from_payload(scope: &str, payload: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(scope.as_bytes());
        hasher.update(b"#");
        hasher.update(payload);
        Self(format!("{scope}#{}", hex::encode(hasher.finalize())))
    }

    /// Returns the fingerprint as the record-store key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_payloads_produce_identical_fingerprints() {
        let a = Fingerprint::from_payload("create_order", b"{\"customer_name\":\"Alice\"}");
        let b = Fingerprint::from_payload("create_order", b"{\"customer_name\":\"Alice\"}");
        assert_eq!(a, b);
    }

    #[test]
    fn payload_changes_change_the_fingerprint() {
        let a = Fingerprint::from_payload("create_order", b"{\"customer_name\":\"Alice\"}");
        let b = Fingerprint::from_payload("create_order", b"{\"customer_name\":\"Bob\"}");
        assert_ne!(a, b);
    }

    #[test]
    fn scope_separates_operations_with_identical_bodies() {
        let a = Fingerprint::from_payload("create_order", b"{}");
        let b = Fingerprint::from_payload("create_user", b"{}");
        assert_ne!(a, b);
    }
}
