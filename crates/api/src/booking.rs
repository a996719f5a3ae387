//! The slot state-machine boundary.
//!
//! A slot cycles FREE -> BOOKED -> FREE. The FREE -> BOOKED transition
//! rides on a single conditional UPDATE in the store, so exactly one of
//! any number of concurrent booking attempts wins; the rest surface a
//! [`BookingError::Conflict`]. Cancellation authorization (the owner or
//! an admin) is checked here and nowhere else.

use uuid::Uuid;

use slotbook_core::{errors::BookingError, models::slot::Slot};
use slotbook_db::repositories;

use crate::middleware::auth::{self, AuthUser};
use crate::notify::run_booking_hooks;
use crate::ApiState;

/// Attempts the FREE -> BOOKED transition for `user`.
///
/// On success the post-commit hooks fire best-effort before returning.
/// A guard failure on an existing slot reports a conflict; the previous
/// booker is never overwritten.
pub async fn book(state: &ApiState, slot_id: Uuid, user: &AuthUser) -> Result<Slot, BookingError> {
    let updated = repositories::slot::book_slot(&state.db_pool, slot_id, user.id)
        .await
        .map_err(BookingError::Database)?;

    let slot: Slot = match updated {
        Some(row) => row.into(),
        None => {
            // The guard did not match: either the slot is gone or
            // another customer won the race.
            return match repositories::slot::get_slot_by_id(&state.db_pool, slot_id)
                .await
                .map_err(BookingError::Database)?
            {
                None => Err(BookingError::NotFound(format!(
                    "Slot with ID {slot_id} not found"
                ))),
                Some(_) => Err(BookingError::Conflict(
                    "This slot was just booked by someone else".to_string(),
                )),
            };
        }
    };

    // Booker email for notifications: prefer the profile row, fall back
    // to the identity header.
    let booker_email = repositories::profile::get_profile_by_id(&state.db_pool, user.id)
        .await
        .ok()
        .flatten()
        .and_then(|profile| profile.email)
        .or_else(|| user.email.clone());

    run_booking_hooks(&state.booking_hooks, &slot, booker_email.as_deref()).await;

    Ok(slot)
}

/// The BOOKED -> FREE transition.
///
/// Allowed for the booking owner and for admins. Cancelling a slot that
/// is already FREE restores nothing and errors nothing.
pub async fn cancel(
    state: &ApiState,
    slot_id: Uuid,
    user: &AuthUser,
) -> Result<Slot, BookingError> {
    let slot = repositories::slot::get_slot_by_id(&state.db_pool, slot_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {slot_id} not found")))?;

    if !slot.is_booked {
        return Ok(slot.into());
    }

    if slot.booked_by != Some(user.id) {
        // Not the owner; only an admin may release someone else's slot.
        auth::require_admin(&state.db_pool, user).await?;
    }

    let released = repositories::slot::cancel_slot(&state.db_pool, slot_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {slot_id} not found")))?;

    Ok(released.into())
}

/// Loads a slot for calendar export, restricted to the booking owner or
/// an admin.
pub async fn booked_slot_for_export(
    state: &ApiState,
    slot_id: Uuid,
    user: &AuthUser,
) -> Result<Slot, BookingError> {
    let slot = repositories::slot::get_slot_by_id(&state.db_pool, slot_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Slot with ID {slot_id} not found")))?;

    if !slot.is_booked {
        return Err(BookingError::Validation(
            "Only booked slots can be exported".to_string(),
        ));
    }

    if slot.booked_by != Some(user.id) {
        auth::require_admin(&state.db_pool, user).await?;
    }

    Ok(slot.into())
}
