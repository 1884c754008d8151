use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use guess_types::Identity;

use crate::config::Config;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,             // User id, e.g. t2_abc123
    pub name: Option<String>,    // Display username
    pub exp: u64,                // Expiry
}

/// Looser claim set accepted in development mode.
#[derive(Debug, Deserialize)]
struct DevClaims {
    #[serde(alias = "userId", alias = "user_id")]
    sub: String,
    #[serde(alias = "username")]
    name: Option<String>,
}

impl DevClaims {
    fn into_identity(self) -> Result<Identity, AuthError> {
        if self.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }
        let username = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.sub.clone());
        Ok(Identity {
            user_id: self.sub,
            username,
        })
    }
}

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    dev_mode: bool,
}

impl AuthService {
    pub fn new(session_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(session_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(session_secret.as_bytes()),
            dev_mode: false,
        }
    }

    /// Dev mode when `auth_dev_mode` is set, otherwise a signing service that needs `session_secret`.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        if config.auth_dev_mode {
            return Ok(Self::new_dev_mode());
        }
        match &config.session_secret {
            Some(secret) => Ok(Self::new(secret)),
            None => Err(AuthError::MissingSecret),
        }
    }

    pub fn new_dev_mode() -> Self {
        Self {
            dev_mode: true,
            ..Self::new("dev")
        }
    }

    /// Resolves the caller from an `authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let header = header.map(str::trim).filter(|h| !h.is_empty());
        let Some(header) = header else {
            return Err(AuthError::MissingToken);
        };
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        self.validate_token(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<Identity, AuthError> {
        if self.dev_mode {
            return self.validate_dev_token(token);
        }

        let validation = Validation::new(Algorithm::HS256);
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => {
                        tracing::warn!("Session token validation failed: {:?}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            tracing::warn!("Session token has an empty subject");
            return Err(AuthError::InvalidToken);
        }

        Ok(Identity {
            username: claims.name.unwrap_or_else(|| claims.sub.clone()),
            user_id: claims.sub,
        })
    }

    /// Signs a session token for the given identity.
    pub fn issue_token(&self, identity: &Identity, ttl: Duration) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::SigningFailed)?;
        let claims = SessionClaims {
            sub: identity.user_id.clone(),
            name: Some(identity.username.clone()),
            exp: (now + ttl).as_secs(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    fn validate_dev_token(&self, token: &str) -> Result<Identity, AuthError> {
        // Dev tokens are trusted as-is: an unverified JWT, a JSON object or "user_id:username"
        tracing::debug!(
            "Validating dev token (first 20 chars): {}",
            token.chars().take(20).collect::<String>()
        );

        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() == 3 {
            let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
                .decode(parts[1].trim_end_matches('='))
                .map_err(|e| {
                    tracing::warn!("Failed to decode JWT payload in dev mode: {:?}", e);
                    AuthError::InvalidToken
                })?;
            let claims: DevClaims = serde_json::from_slice(&payload).map_err(|e| {
                tracing::warn!("Failed to parse JWT claims in dev mode: {:?}", e);
                AuthError::InvalidToken
            })?;
            return claims.into_identity();
        }

        if token.starts_with('{') && token.ends_with('}') {
            let claims: DevClaims =
                serde_json::from_str(token).map_err(|_| AuthError::InvalidToken)?;
            return claims.into_identity();
        }

        match token.split_once(':') {
            Some((user_id, username)) if !user_id.is_empty() && !username.is_empty() => {
                Ok(Identity {
                    user_id: user_id.to_string(),
                    username: username.to_string(),
                })
            }
            _ => Err(AuthError::InvalidToken),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Failed to sign token")]
    SigningFailed,
    #[error("SESSION_SECRET must be set unless AUTH_DEV_MODE=true")]
    MissingSecret,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AuthError::SigningFailed
    }
}
