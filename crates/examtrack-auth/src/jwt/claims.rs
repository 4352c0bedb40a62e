//! JWT claims structure embedded in every bearer token.

use serde::{Deserialize, Serialize};

use examtrack_entity::role::Role;

/// Claims payload carried by ExamTrack tokens.
///
/// Field names and the numeric role/admin encoding match the token data
/// already in circulation, so existing tokens keep verifying. The raw role
/// number is kept as issued: tokens for roles outside student/teacher are
/// valid tokens, they just cannot authenticate a realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Participant identity.
    pub user_id: i64,
    /// Login name, for logging.
    pub username: String,
    /// Participant role (1 = student, 2 = teacher).
    pub role: u8,
    /// Admin flag (0 or 1).
    pub is_admin: u8,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token issuer.
    pub iss: String,
}

impl Claims {
    /// The participant role, if the numeric value names one.
    pub fn participant_role(&self) -> Option<Role> {
        Role::try_from(self.role).ok()
    }

    /// Whether the token carries the admin flag.
    pub fn is_admin(&self) -> bool {
        self.is_admin != 0
    }
}
