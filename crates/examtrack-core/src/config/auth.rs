//! Token verification configuration.

use serde::{Deserialize, Serialize};

/// JWT token verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret for access tokens.
    pub jwt_secret: String,
    /// Token issuer claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

fn default_issuer() -> String {
    "examtrack".to_string()
}

fn default_token_ttl_days() -> i64 {
    7
}
