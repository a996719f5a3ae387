use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use slotbook_core::{
    calendar::{self, CalendarEvent},
    errors::BookingError,
    grid::slot_start_label,
    models::slot::{GoogleCalendarLinkResponse, MyBookingsResponse, SlotResponse},
};

use crate::{
    booking,
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Books a free slot for the caller. Exactly one concurrent attempt per
/// slot succeeds; the rest receive 409.
#[axum::debug_handler]
pub async fn book_slot(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotResponse>, AppError> {
    let slot = booking::book(&state, id, &user).await?;

    Ok(Json(SlotResponse::from(&slot)))
}

/// Releases a booking. The owner may cancel their own; admins may cancel
/// any.
#[axum::debug_handler]
pub async fn cancel_slot(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotResponse>, AppError> {
    let slot = booking::cancel(&state, id, &user).await?;

    Ok(Json(SlotResponse::from(&slot)))
}

#[axum::debug_handler]
pub async fn my_bookings(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
) -> Result<Json<MyBookingsResponse>, AppError> {
    let rows = slotbook_db::repositories::slot::list_bookings_for_profile(
        &state.db_pool,
        user.id,
    )
    .await
    .map_err(BookingError::Database)?;

    let bookings = rows
        .into_iter()
        .map(|row| {
            let slot: slotbook_core::models::slot::Slot = row.into();
            SlotResponse::from(&slot)
        })
        .collect();

    Ok(Json(MyBookingsResponse { bookings }))
}

fn export_event(slot: &slotbook_core::models::slot::Slot) -> CalendarEvent {
    CalendarEvent {
        title: format!(
            "Booking {} - {}",
            slot_start_label(&slot.start_time),
            slot_start_label(&slot.end_time)
        ),
        start: slot.start_time,
        end: slot.end_time,
        details: Some("Reserved via slotbook".to_string()),
        location: None,
    }
}

/// Downloads the booking as a `.ics` file.
#[axum::debug_handler]
pub async fn calendar_ics(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let slot = booking::booked_slot_for_export(&state, id, &user).await?;

    let event = export_event(&slot);
    let uid = format!("{}@slotbook", slot.id);
    let ics = calendar::ics_content(&event, &uid, Utc::now());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"booking.ics\"",
            ),
        ],
        ics,
    ))
}

/// Returns a prefilled Google Calendar link for the booking.
#[axum::debug_handler]
pub async fn calendar_google(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GoogleCalendarLinkResponse>, AppError> {
    let slot = booking::booked_slot_for_export(&state, id, &user).await?;

    let url = calendar::google_calendar_url(&export_event(&slot));

    Ok(Json(GoogleCalendarLinkResponse { url }))
}
