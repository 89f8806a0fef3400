//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in user in route handlers, and
//! the admin guard protecting cafe deletion.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// The single identity permitted to delete cafes.
///
/// There is no role table: delete rights belong to exactly this user id, and
/// owning a cafe grants nothing.
pub const ADMIN_USER_ID: i64 = 1;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDecision {
    /// The request may proceed.
    Allowed,
    /// The request is rejected with the given reason.
    Denied {
        /// Why the request was rejected.
        reason: &'static str,
    },
}

/// Decide whether the given identity may delete cafes.
///
/// Unauthenticated requests are denied the same way as authenticated
/// non-admin ones: there is no identifier to compare.
#[must_use]
pub fn authorize_delete(user: Option<&CurrentUser>) -> AdminDecision {
    match user {
        Some(u) if u.id.as_i64() == ADMIN_USER_ID => AdminDecision::Allowed,
        Some(_) => AdminDecision::Denied {
            reason: "only the admin account may delete cafes",
        },
        None => AdminDecision::Denied {
            reason: "authentication required to delete cafes",
        },
    }
}

/// Read the current user out of the request's session, if any.
async fn current_user_from_parts(parts: &Parts) -> Option<CurrentUser> {
    match parts.extensions.get::<Session>() {
        Some(session) => session
            .get::<CurrentUser>(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten(),
        None => None,
    }
}

// =============================================================================
// RequireAuth
// =============================================================================

/// Extractor that requires a logged-in user.
///
/// If nobody is logged in, redirects to the login page with a flash message.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but nobody is logged in.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/login?error=login_required").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user_from_parts(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection)
    }
}

// =============================================================================
// OptionalAuth
// =============================================================================

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireAuth`, this does not reject the request when nobody is
/// logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user_from_parts(parts).await))
    }
}

// =============================================================================
// RequireAdmin
// =============================================================================

/// Extractor gating the delete route on [`authorize_delete`].
///
/// Every denial, unauthenticated or wrong identity alike, is an HTTP 403
/// with the denial reason in the body.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection carrying the typed denial reason.
pub struct AdminRejection {
    reason: &'static str,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, self.reason).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user_from_parts(parts).await;

        if let AdminDecision::Denied { reason } = authorize_delete(user.as_ref()) {
            return Err(AdminRejection { reason });
        }

        // authorize_delete only allows an authenticated identity
        user.map(Self).ok_or(AdminRejection {
            reason: "authentication required to delete cafes",
        })
    }
}

// =============================================================================
// Session helpers
// =============================================================================

/// Set the current user in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
