//! Password hashing (bcrypt).

use ledgerly_core::{DomainError, DomainResult};

/// Bcrypt cost factor. Tuned for tens of milliseconds per hash.
const BCRYPT_COST: u32 = 10;

/// Hash a clear-text password with a fresh salt.
pub fn hash(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
}

/// Constant-cost comparison of a clear-text password against a stored hash.
///
/// A malformed stored hash is treated as a mismatch rather than surfaced:
/// login must never reveal anything about the stored record.
pub fn verify(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let h = hash("hunter22").unwrap();
        assert!(verify("hunter22", &h));
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let h = hash("hunter22").unwrap();
        assert!(!verify("hunter23", &h));
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        // Fresh salt per call.
        let a = hash("hunter22").unwrap();
        let b = hash("hunter22").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_a_mismatch() {
        assert!(!verify("hunter22", "not-a-bcrypt-hash"));
    }
}
