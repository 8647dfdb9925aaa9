use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration takes the same body as login
pub type RegisterRequest = LoginRequest;

/// Paths tried in order; the first non-empty string wins
const TOKEN_PATHS: [&str; 4] = [
    "/accessToken",
    "/access_token",
    "/data/accessToken",
    "/data/access_token",
];

/// Login response. The token may sit at the top level or under `data`,
/// in either camelCase or snake_case, so the body is kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginResponse {
    body: serde_json::Value,
}

impl LoginResponse {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            body: serde_json::json!({ "accessToken": token.into() }),
        }
    }

    pub fn token(&self) -> Option<&str> {
        TOKEN_PATHS
            .iter()
            .filter_map(|path| self.body.pointer(path))
            .filter_map(serde_json::Value::as_str)
            .map(str::trim)
            .find(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub exp: f64, // expiration timestamp, seconds (may be fractional)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Shape,
    #[error("token payload is not valid base64url")]
    Encoding,
    #[error("token payload has no readable exp claim")]
    Claims,
}

/// Decode the claims segment of a JWT without verifying the signature
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(TokenError::Shape),
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Encoding)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Claims)
}

/// Bearer token together with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn from_token(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        let claims = decode_claims(&token)?;
        if !claims.exp.is_finite() {
            return Err(TokenError::Claims);
        }
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp.trunc() as i64, 0).ok_or(TokenError::Claims)?;
        Ok(Self { token, expires_at })
    }

    /// A credential is usable only while `expires_at > now`
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
