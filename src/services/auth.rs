use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Authorization failures surfaced by token verification
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid token")]
    InvalidToken,
}

/// Claims carried by the dashboard's bearer tokens
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    email: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

/// Stateless verifier for HS256-signed bearer tokens.
///
/// Verification is a pure validation gate: signature and expiry are checked
/// against the fixed signing secret, then the `email` claim becomes the
/// caller's identity. No session state exists on either side.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify the token and extract the identity it was issued to.
    ///
    /// A missing or empty `email` claim is invalid even when the signature
    /// checks out.
    pub fn resolve(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        match data.claims.email {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "test-secret";

    #[derive(Serialize)]
    struct TestClaims {
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        exp: i64,
    }

    fn mint(email: Option<&str>, exp_offset_secs: i64, secret: &str) -> String {
        let claims = TestClaims {
            email: email.map(str::to_string),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_resolves_to_email() {
        let verifier = TokenVerifier::new(SECRET);
        let token = mint(Some("user@test.com"), 3600, SECRET);

        assert_eq!(verifier.resolve(&token).unwrap(), "user@test.com");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        // well past the default leeway
        let token = mint(Some("user@test.com"), -3600, SECRET);

        assert_eq!(verifier.resolve(&token), Err(AuthError::ExpiredToken));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);
        let token = mint(Some("user@test.com"), 3600, "other-secret");

        assert_eq!(verifier.resolve(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);

        assert_eq!(
            verifier.resolve("not.a.token"),
            Err(AuthError::InvalidToken)
        );
        assert_eq!(verifier.resolve(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_missing_or_empty_email_is_invalid() {
        let verifier = TokenVerifier::new(SECRET);

        let no_email = mint(None, 3600, SECRET);
        assert_eq!(verifier.resolve(&no_email), Err(AuthError::InvalidToken));

        let empty_email = mint(Some(""), 3600, SECRET);
        assert_eq!(verifier.resolve(&empty_email), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
        assert_eq!(bearer_token(""), None);
    }
}
