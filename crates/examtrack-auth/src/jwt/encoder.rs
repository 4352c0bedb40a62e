//! JWT token creation.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use examtrack_core::config::auth::AuthConfig;
use examtrack_core::error::AppError;

use super::claims::Claims;

/// Creates signed bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in days.
    token_ttl_days: i64,
    /// Issuer claim value.
    issuer: String,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_days: config.token_ttl_days,
            issuer: config.issuer.clone(),
        }
    }

    /// Generates a signed token for a participant.
    pub fn generate(
        &self,
        user_id: i64,
        username: &str,
        role: u8,
        is_admin: u8,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            username: username.to_string(),
            role,
            is_admin,
            iat: now.timestamp(),
            exp: (now + Duration::days(self.token_ttl_days)).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(
                examtrack_core::error::ErrorKind::Internal,
                format!("Failed to sign token: {e}"),
                e,
            ))
    }
}
