use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::auth::roles::Role;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Why a token failed verification.
///
/// Verification failure is a value, never an error propagated across this
/// module boundary; callers decide how (and whether) to surface it. All
/// variants produce the same client-visible outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    InvalidSignature,
    Malformed,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Expired => write!(f, "token expired"),
            TokenError::InvalidSignature => write!(f, "invalid signature"),
            TokenError::Malformed => write!(f, "malformed token"),
        }
    }
}

/// Mint a signed access token for the given subject.
///
/// Expiry is `now` plus the configured TTL (30 days by default, matching
/// the auth cookie's max-age).
pub fn mint_access_token(
    sub: i64,
    role: Role,
    email: Option<String>,
    telegram_id: Option<i64>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = iat + security.token_ttl.whole_seconds();

    let claims = Claims {
        sub,
        role,
        email,
        telegram_id,
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token's signature and expiry, returning its claims.
///
/// Also rejects non-positive subjects: legacy string-form ids are
/// normalized during claims deserialization, but a zero or negative id
/// can never reference a stored account.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    if claims.sub <= 0 {
        return Err(TokenError::Malformed);
    }

    Ok(claims)
}
