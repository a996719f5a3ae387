use axum::{extract::State, Json};
use std::sync::Arc;

use slotbook_core::{
    errors::BookingError,
    models::profile::{Profile, ProfileResponse, Role},
};

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Creates the caller's profile, deriving the role from the configured
/// admin address. Re-registering refreshes the email only; the role is
/// assigned once.
#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let role = match &user.email {
        Some(email) if email.eq_ignore_ascii_case(&state.admin_email) => Role::Admin,
        _ => Role::Customer,
    };

    let row = slotbook_db::repositories::profile::upsert_profile(
        &state.db_pool,
        user.id,
        user.email.as_deref(),
        role,
    )
    .await
    .map_err(BookingError::Database)?;

    let profile: Profile = row
        .try_into()
        .map_err(|err: String| BookingError::Internal(err.into()))?;

    Ok(Json(ProfileResponse::from(&profile)))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = crate::middleware::auth::current_profile(&state.db_pool, &user).await?;

    Ok(Json(ProfileResponse::from(&profile)))
}
