//! Password-reset tokens: short-lived single-purpose HS256 JWTs binding an
//! email address to a reset intent. Never persisted; the signature and the
//! `exp` claim are the only validity checks. The signing secret is passed in
//! explicitly so the module stays free of process-global state.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminates reset tokens from the access/refresh JWTs signed with the
/// same secret.
pub const TOKEN_TYPE: &str = "reset";

pub const LIFETIME_MINUTES: i64 = 15;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResetClaims {
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTokenError {
    /// Signature valid, expiry in the past.
    Expired,
    /// Bad signature, malformed structure, or wrong token type.
    Invalid,
}

impl std::fmt::Display for ResetTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetTokenError::Expired => write!(f, "This token has expired."),
            ResetTokenError::Invalid => write!(f, "This token is invalid."),
        }
    }
}

/// Mint a reset token for `email`, valid for 15 minutes. A fresh random
/// `jti` makes every issued token distinct even within one second.
pub fn issue(email: &str, secret: &str) -> Result<String, String> {
    let now = Utc::now();
    let claims = ResetClaims {
        token_type: TOKEN_TYPE.to_string(),
        exp: (now + Duration::minutes(LIFETIME_MINUTES)).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4(),
        email: email.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

/// Verify signature and expiry, returning the decoded claims. Performs no
/// datastore lookup; the caller resolves the subject email afterwards.
/// There is no replay tracking: a token stays valid until expiry.
pub fn verify(token: &str, secret: &str) -> Result<ResetClaims, ResetTokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let claims = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => ResetTokenError::Expired,
        _ => ResetTokenError::Invalid,
    })?;

    if claims.token_type != TOKEN_TYPE {
        return Err(ResetTokenError::Invalid);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key";

    #[test]
    fn round_trip_returns_subject_email() {
        let token = issue("user@example.com", SECRET).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.token_type, TOKEN_TYPE);
        assert_eq!(claims.exp - claims.iat, LIFETIME_MINUTES * 60);
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let now = Utc::now();
        let claims = ResetClaims {
            token_type: TOKEN_TYPE.to_string(),
            exp: (now - Duration::hours(1)).timestamp(),
            iat: (now - Duration::hours(2)).timestamp(),
            jti: Uuid::new_v4(),
            email: "user@example.com".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(verify(&token, SECRET), Err(ResetTokenError::Expired));
    }

    #[test]
    fn wrong_secret_fails_with_invalid() {
        let token = issue("user@example.com", SECRET).unwrap();
        assert_eq!(
            verify(&token, "a-different-secret"),
            Err(ResetTokenError::Invalid)
        );
    }

    #[test]
    fn tampered_token_fails_with_invalid() {
        let token = issue("user@example.com", SECRET).unwrap();

        // Flip one character of the signature segment.
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(verify(&tampered, SECRET), Err(ResetTokenError::Invalid));
    }

    #[test]
    fn malformed_token_fails_with_invalid() {
        assert_eq!(verify("ey...", SECRET), Err(ResetTokenError::Invalid));
        assert_eq!(verify("", SECRET), Err(ResetTokenError::Invalid));
    }

    #[test]
    fn two_issues_produce_distinct_tokens() {
        let first = issue("user@example.com", SECRET).unwrap();
        let second = issue("user@example.com", SECRET).unwrap();
        assert_ne!(first, second);

        let first = verify(&first, SECRET).unwrap();
        let second = verify(&second, SECRET).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn access_token_rejected_as_reset_token() {
        let access =
            crate::auth::jwt::issue(Uuid::now_v7(), crate::auth::jwt::TokenKind::Access, SECRET)
                .unwrap();
        assert_eq!(verify(&access, SECRET), Err(ResetTokenError::Invalid));
    }
}
