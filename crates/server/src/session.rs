// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! These Axum extractors validate the bearer token at the server boundary
//! and hand handlers the signed-in user along with the instant the request
//! was authenticated at.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use meal_order_api::{ApiError, AuthenticatedUser, AuthenticationService};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for signed-in users.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(session: SessionUser) -> Result<Json<Response>, HttpError> {
///     // session.actor: AuthenticatedUser
///     // session.now: the instant read for this request
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the `Authorization: Bearer <token>` header is
/// missing or malformed, or if the session is unknown or expired.
pub struct SessionUser {
    pub actor: AuthenticatedUser,
    pub token: String,
    /// The clock reading used to validate the session.
    pub now: OffsetDateTime,
}

/// Like `SessionUser`, but a missing `Authorization` header is allowed.
///
/// A header that is present and invalid is still rejected.
pub struct OptionalSessionUser(pub Option<SessionUser>);

fn bearer_token(parts: &Parts) -> Result<Option<String>, SessionError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value: &str = header.to_str().map_err(|_| {
        warn!("Invalid Authorization header encoding");
        SessionError::InvalidAuthorizationHeader
    })?;

    value
        .strip_prefix("Bearer ")
        .map(|token| Some(token.trim().to_string()))
        .ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })
}

async fn authenticate(state: &AppState, token: String) -> Result<SessionUser, SessionError> {
    let now: OffsetDateTime = state.clock.now_utc();

    let mut persistence = state.persistence.lock().await;
    let (actor, _user) = AuthenticationService::validate_session(&mut persistence, &token, now)
        .map_err(|e| match e {
            ApiError::AuthenticationFailed { reason } => {
                warn!(reason = %reason, "Session validation failed");
                SessionError::InvalidSession(reason)
            }
            other => SessionError::Unavailable(other.to_string()),
        })?;
    drop(persistence);

    debug!(user_id = %actor.user_id, role = %actor.role, "Session validated");

    Ok(SessionUser {
        actor,
        token,
        now,
    })
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(parts)?.ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?;

        authenticate(state, token).await
    }
}

impl FromRequestParts<AppState> for OptionalSessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(Self(Some(authenticate(state, token).await?))),
            None => Ok(Self(None)),
        }
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// The token is unknown or expired.
    InvalidSession(String),
    /// The session store could not be read.
    Unavailable(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            Self::MissingAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                String::from("Missing Authorization header"),
            ),
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                String::from("Invalid Authorization header format. Expected: 'Bearer <token>'"),
            ),
            Self::InvalidSession(reason) => (
                StatusCode::UNAUTHORIZED,
                format!("Session validation failed: {reason}"),
            ),
            Self::Unavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
