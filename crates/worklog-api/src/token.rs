use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity claims carried in a token: the username, nothing else.
/// Tokens have no expiry — they stay valid until the secret rotates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed or tampered token")]
    Invalid,
}

pub fn issue(secret: &str, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        username: username.to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify(secret: &str, token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // No expiry claim is embedded, so none is enforced.
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issue_then_verify_round_trips_the_username() {
        let token = issue(SECRET, "alice").unwrap();
        let claims = verify(SECRET, &token).unwrap();
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn any_mutation_invalidates() {
        let token = issue(SECRET, "alice").unwrap();
        let mut tampered = token.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] ^= 1;
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(verify(SECRET, &tampered).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let token = issue(SECRET, "alice").unwrap();
        assert!(verify("other-secret", &token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify(SECRET, "not.a.token").is_err());
        assert!(verify(SECRET, "").is_err());
    }
}
