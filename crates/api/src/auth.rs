// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Sessions are opaque bearer tokens stored server-side. Every function
//! that depends on time takes `now` from the caller; nothing here reads
//! the system clock.

use meal_order_domain::{Role, UserId};
use meal_order_persistence::{Persistence, SessionData, UserData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::credential_policy::CredentialPolicy;
use crate::error::{ApiError, AuthError};
use crate::request_response::{
    SessionInfo, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse,
};

/// Length of generated user IDs.
const USER_ID_LENGTH: usize = 15;

const USER_ID_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Message for both unknown usernames and wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Username or password is incorrect";

/// A signed-in user, as established by a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    #[must_use]
    pub const fn new(user_id: UserId, username: String, role: Role) -> Self {
        Self {
            user_id,
            username,
            role,
        }
    }

    fn from_user(user: &UserData) -> Self {
        Self::new(user.user_id.clone(), user.username.clone(), user.role)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to register another user.
    ///
    /// Only admins may register users once the bootstrap account exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the admin role.
    pub fn authorize_register_user(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require_admin(actor, "register_user")
    }

    /// Checks if an actor is authorized to view every user's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the admin role.
    pub fn authorize_view_all_orders(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        Self::require_admin(actor, "view_all_orders")
    }

    fn require_admin(actor: &AuthenticatedUser, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: Role::Admin.to_string(),
            }),
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime.
    pub const DEFAULT_SESSION_TTL: Duration = Duration::days(30);

    /// Registers an account.
    ///
    /// The first account ever created is the bootstrap administrator: it
    /// needs no caller, always gets the `admin` role, and is signed in at
    /// once. After that only an admin may register users, and the new
    /// account is not signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input violates the credential policy
    /// - Users exist and the caller is missing or not an admin
    /// - The username is taken
    /// - Database operations fail
    pub fn sign_up(
        persistence: &mut Persistence,
        actor: Option<&AuthenticatedUser>,
        request: &SignUpRequest,
        now: OffsetDateTime,
        session_ttl: Duration,
    ) -> Result<SignUpResponse, ApiError> {
        CredentialPolicy::default().validate_sign_up(
            &request.username,
            &request.password,
            &request.confirm_password,
        )?;

        let bootstrap: bool = persistence.count_users()? == 0;

        let role: Role = if bootstrap {
            Role::Admin
        } else {
            let actor: &AuthenticatedUser =
                actor.ok_or_else(|| ApiError::AuthenticationFailed {
                    reason: String::from("Only an administrator can register users"),
                })?;
            AuthorizationService::authorize_register_user(actor)?;
            request.role.unwrap_or_default()
        };

        let user_id: UserId = Self::generate_user_id()?;
        persistence.create_user(&user_id, &request.username, &request.password, role)?;

        info!(
            user_id = %user_id,
            username = %request.username,
            role = %role,
            bootstrap,
            "User registered"
        );

        let session: Option<SessionInfo> = if bootstrap {
            Some(Self::issue_session(persistence, &user_id, now, session_ttl)?)
        } else {
            None
        };

        Ok(SignUpResponse {
            user_id: user_id.to_string(),
            username: request.username.clone(),
            role,
            session,
            message: String::from("Account created successfully"),
        })
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed, the credentials are
    /// wrong, or database operations fail.
    pub fn sign_in(
        persistence: &mut Persistence,
        request: &SignInRequest,
        now: OffsetDateTime,
        session_ttl: Duration,
    ) -> Result<SignInResponse, ApiError> {
        CredentialPolicy::default().validate_credentials(&request.username, &request.password)?;

        let Some(user) = persistence.get_user_by_username(&request.username)? else {
            warn!(username = %request.username, "Sign-in for unknown username");
            return Err(Self::invalid_credentials());
        };

        if !Persistence::verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.user_id, "Sign-in with wrong password");
            return Err(Self::invalid_credentials());
        }

        let session: SessionInfo = Self::issue_session(persistence, &user.user_id, now, session_ttl)?;

        info!(user_id = %user.user_id, "User signed in");

        Ok(SignInResponse {
            user_id: user.user_id.to_string(),
            username: user.username,
            role: user.role,
            session,
        })
    }

    /// Validates a session token and returns the signed-in user.
    ///
    /// Expired sessions are removed as they are found.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the token is unknown or expired,
    /// or `StoreUnavailable` if the database fails.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> Result<(AuthenticatedUser, UserData), ApiError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Rfc3339).map_err(|e| {
                ApiError::StoreUnavailable {
                    message: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        if now >= expires_at {
            warn!(session_id = session.session_id, "Rejected expired session");
            persistence.delete_session(session_token)?;
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(&session.user_id)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence.update_session_activity(session.session_id)?;

        Ok((AuthenticatedUser::from_user(&user), user))
    }

    /// Ends a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn sign_out(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
        let removed: bool = persistence.delete_session(session_token)?;
        info!(removed, "User signed out");
        Ok(())
    }

    /// Removes every session that has expired by `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn purge_expired_sessions(
        persistence: &mut Persistence,
        now: OffsetDateTime,
    ) -> Result<usize, ApiError> {
        let now_str: String = Self::format_timestamp(now)?;
        Ok(persistence.delete_expired_sessions(&now_str)?)
    }

    fn issue_session(
        persistence: &mut Persistence,
        user_id: &UserId,
        now: OffsetDateTime,
        session_ttl: Duration,
    ) -> Result<SessionInfo, ApiError> {
        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::format_timestamp(now + session_ttl)?;

        persistence.create_session(&session_token, user_id, &expires_at)?;

        Ok(SessionInfo {
            session_token,
            expires_at,
        })
    }

    /// Formats a timestamp as whole-second RFC 3339 UTC.
    ///
    /// Stored expiries share this layout so they compare correctly as text.
    fn format_timestamp(instant: OffsetDateTime) -> Result<String, ApiError> {
        instant
            .to_offset(time::UtcOffset::UTC)
            .replace_nanosecond(0)
            .map_err(|e| ApiError::StoreUnavailable {
                message: format!("Failed to truncate timestamp: {e}"),
            })?
            .format(&Rfc3339)
            .map_err(|e| ApiError::StoreUnavailable {
                message: format!("Failed to format timestamp: {e}"),
            })
    }

    /// Generates a 256-bit hex session token.
    fn generate_session_token() -> String {
        (0..4)
            .map(|_| format!("{:016x}", rand::random::<u64>()))
            .collect()
    }

    /// Generates a random lowercase alphanumeric user ID.
    fn generate_user_id() -> Result<UserId, ApiError> {
        let id: String = (0..USER_ID_LENGTH)
            .map(|_| {
                let index: u64 = rand::random::<u64>() % 36;
                char::from(USER_ID_ALPHABET[usize::try_from(index).unwrap_or_default()])
            })
            .collect();
        Ok(UserId::new(&id)?)
    }

    fn invalid_credentials() -> ApiError {
        ApiError::AuthenticationFailed {
            reason: String::from(INVALID_CREDENTIALS_MESSAGE),
        }
    }
}
