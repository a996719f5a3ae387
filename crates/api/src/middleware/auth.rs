//! # Authentication Module
//!
//! Identity extraction and the role gate.
//!
//! Authentication itself is delegated to the fronting identity provider,
//! which forwards the verified subject id and email as `x-user-id` /
//! `x-user-email` request headers. This module turns those headers into
//! an [`AuthUser`] and resolves the profile role on demand.
//!
//! The role is re-read on every gated operation. Role changes are rare
//! and the lookup is a single point read, so no caching layer sits in
//! front of it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;
use uuid::Uuid;

use slotbook_core::{
    errors::BookingError,
    models::profile::{Profile, Role},
};

use crate::middleware::error_handling::AppError;

/// Header carrying the identity provider's subject id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the identity's email address.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The authenticated identity attached to a request.
///
/// Extraction fails with 401 when the identity headers are missing or
/// malformed; both admin and customer workflows require a signed-in
/// identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError(BookingError::Authentication(
                    "Sign in to continue".to_string(),
                ))
            })?;

        let id = Uuid::parse_str(raw_id).map_err(|_| {
            AppError(BookingError::Authentication(format!(
                "Malformed identity: {raw_id}"
            )))
        })?;

        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(AuthUser { id, email })
    }
}

/// Resolves the caller's profile, failing with a correctable hint when
/// the row is missing.
pub async fn current_profile(pool: &PgPool, user: &AuthUser) -> Result<Profile, BookingError> {
    let row = slotbook_db::repositories::profile::get_profile_by_id(pool, user.id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!(
                "No profile for identity {}. Register first, or add a reserve_profiles row with this id.",
                user.id
            ))
        })?;

    row.try_into()
        .map_err(|err: String| BookingError::Internal(err.into()))
}

/// The admin gate. Missing profile rows and lookup failures both refuse
/// the operation (fail closed), carrying the subject id so the state can
/// be corrected out-of-band.
pub async fn require_admin(pool: &PgPool, user: &AuthUser) -> Result<Profile, BookingError> {
    let profile = slotbook_db::repositories::profile::get_profile_by_id(pool, user.id)
        .await
        .map_err(|err| {
            BookingError::Authorization(format!(
                "Could not resolve role for identity {}: {err}",
                user.id
            ))
        })?
        .ok_or_else(|| {
            BookingError::Authorization(format!(
                "Admin access required, and identity {} has no profile",
                user.id
            ))
        })?;

    let refused = || {
        BookingError::Authorization(format!("Admin access required for identity {}", user.id))
    };
    let profile: Profile = profile.try_into().map_err(|_: String| refused())?;
    if profile.role != Role::Admin {
        return Err(refused());
    }

    Ok(profile)
}
