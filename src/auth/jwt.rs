//! Access/refresh session tokens. Both are HS256 JWTs carrying a
//! `token_type` discriminator so one kind can never stand in for the other
//! (or for a password-reset token).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ACCESS_LIFETIME_MINUTES: i64 = 15;
pub const REFRESH_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            TokenKind::Access => Duration::minutes(ACCESS_LIFETIME_MINUTES),
            TokenKind::Refresh => Duration::days(REFRESH_LIFETIME_DAYS),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub token_type: String,
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
    pub jti: Uuid,
}

pub fn issue(user_id: Uuid, kind: TokenKind, secret: &str) -> Result<String, String> {
    let now = Utc::now();
    let claims = Claims {
        token_type: kind.as_str().to_string(),
        sub: user_id,
        exp: (now + kind.lifetime()).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

/// Decode a token, requiring it to be of the expected kind.
pub fn decode_token(token: &str, kind: TokenKind, secret: &str) -> Result<Claims, String> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))?;

    if claims.token_type != kind.as_str() {
        return Err(format!(
            "Expected {} token, got {}",
            kind.as_str(),
            claims.token_type
        ));
    }

    Ok(claims)
}
