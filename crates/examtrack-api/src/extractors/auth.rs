//! `AuthUser` extractor — validates the bearer token and exposes claims.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use examtrack_auth::Claims;
use examtrack_core::error::AppError;
use examtrack_entity::role::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Participant id from the token.
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }

    /// The caller's role, or an authorization error for tokens carrying a
    /// role outside student/teacher.
    pub fn role(&self) -> Result<Role, AppError> {
        self.0
            .participant_role()
            .ok_or_else(|| AppError::authorization("Role not permitted for this API"))
    }

    /// Errors unless the caller is a teacher.
    pub fn require_teacher(&self) -> Result<(), AppError> {
        match self.role()? {
            Role::Teacher => Ok(()),
            Role::Student => Err(AppError::authorization("Teacher role required")),
        }
    }

    /// Errors unless the caller is a student.
    pub fn require_student(&self) -> Result<(), AppError> {
        match self.role()? {
            Role::Student => Ok(()),
            Role::Teacher => Err(AppError::authorization("Student role required")),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;
        Ok(AuthUser(claims))
    }
}
