use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use anyhow::anyhow;

/// Argon2id with a fresh random salt, stored as a PHC string.
pub fn hash(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {e}"))?;
    Ok(hash.to_string())
}

/// Mismatch and malformed-hash both read as false; callers normalize
/// every false to `user_not_found`.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_is_salted() {
        let a = hash("hunter22").unwrap();
        let b = hash("hunter22").unwrap();
        assert_ne!(a, b);
        assert!(verify("hunter22", &a));
        assert!(verify("hunter22", &b));
    }

    #[test]
    fn wrong_password_fails() {
        let h = hash("hunter22").unwrap();
        assert!(!verify("hunter23", &h));
    }

    #[test]
    fn plaintext_never_appears_in_the_hash() {
        let h = hash("hunter22").unwrap();
        assert!(!h.contains("hunter22"));
    }
}
