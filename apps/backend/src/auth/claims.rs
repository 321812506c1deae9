//! Signed credential claims carried by access tokens.

use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::roles::Role;

/// Claims included in backend-issued access tokens.
///
/// `sub` is always an integer here. Tokens minted by the legacy stack
/// carried the user id as a JSON string, so deserialization normalizes
/// both shapes in one place; nothing downstream ever re-parses it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User id of the authenticated subject
    #[serde(deserialize_with = "numeric_subject")]
    pub sub: i64,
    /// Role carried for downstream authorization decisions
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// External (Telegram) account id, when the account is linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Accept `42` or `"42"` for the subject and normalize to `i64`.
fn numeric_subject<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Number(i64),
        Text(String),
    }

    match Subject::deserialize(deserializer)? {
        Subject::Number(n) => Ok(n),
        Subject::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("subject is not numeric: '{s}'"))),
    }
}
