//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sceneflow_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Verified identity extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication. The `email` field is the system's ownership key;
/// handlers must never take an identity from a request body instead.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    /// The verified email claim.
    pub email: String,
    /// The identity provider's opaque subject id (from `claims.sub`).
    pub subject: String,
}

/// Validate a raw token and produce an identity.
///
/// Shared by the header extractor and the WebSocket upgrade, which
/// carries its token in a query parameter. Fails closed: a token whose
/// email claim is empty is as unauthorized as no token at all.
pub fn identity_from_token(
    token: &str,
    config: &crate::auth::jwt::JwtConfig,
) -> Result<AuthIdentity, AppError> {
    let claims = validate_token(token, config)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid or expired token".into())))?;

    let email = claims.email.trim();
    if email.is_empty() {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Token has no email claim".into(),
        )));
    }

    Ok(AuthIdentity {
        email: email.to_string(),
        subject: claims.sub,
    })
}

impl FromRequestParts<AppState> for AuthIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        identity_from_token(token, &state.config.jwt)
    }
}
