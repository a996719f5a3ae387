use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

use slotbook_core::{
    errors::BookingError,
    models::slot::{
        CreateSlotsRequest, CreateSlotsResponse, ListSlotsResponse, SlotResponse,
        SlotWithBookerResponse,
    },
    slot_input,
};

use crate::{
    middleware::{auth, auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Admin bulk slot creation: validates the scheduling intent and inserts
/// the whole batch as one statement. A duplicate start time, whether in
/// the batch or against existing slots, rejects the batch.
#[axum::debug_handler]
pub async fn create_slots(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<CreateSlotsRequest>,
) -> Result<Json<CreateSlotsResponse>, AppError> {
    auth::require_admin(&state.db_pool, &user).await?;

    let new_slots = slot_input::build_slots(
        payload.date,
        payload.times.as_deref(),
        payload.start_time.as_deref(),
        payload.end_time.as_deref(),
    )?;

    let created = slotbook_db::repositories::slot::create_slots(&state.db_pool, &new_slots)
        .await
        .map_err(|err| match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                BookingError::Conflict(
                    "A slot already exists at one of the requested start times".to_string(),
                )
            }
            _ => BookingError::Database(err),
        })?;

    let slots: Vec<SlotResponse> = created
        .into_iter()
        .map(|row| {
            let slot: slotbook_core::models::slot::Slot = row.into();
            SlotResponse::from(&slot)
        })
        .collect();

    Ok(Json(CreateSlotsResponse { created: slots.len(), slots }))
}

/// Date-range filter for the admin listing. Defaults mirror the admin
/// calendar: a week back through ninety days ahead.
#[derive(Debug, Deserialize)]
pub struct ListSlotsQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Query(query): Query<ListSlotsQuery>,
) -> Result<Json<ListSlotsResponse>, AppError> {
    auth::require_admin(&state.db_pool, &user).await?;

    let today = Utc::now().date_naive();
    let (from, to) = range_bounds(
        query.from.unwrap_or(today - Duration::days(7)),
        query.to.unwrap_or(today + Duration::days(90)),
    )?;

    let rows = slotbook_db::repositories::slot::list_slots_with_booker_between(
        &state.db_pool,
        from,
        to,
    )
    .await
    .map_err(BookingError::Database)?;

    let slots = rows
        .into_iter()
        .map(|row| SlotWithBookerResponse {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            booker_email: row.booker_email,
        })
        .collect();

    Ok(Json(ListSlotsResponse { slots }))
}

/// Turns an inclusive date pair into half-open UTC instants.
pub(crate) fn range_bounds(
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>), BookingError> {
    if to < from {
        return Err(BookingError::Validation(
            "End date must not be before start date".to_string(),
        ));
    }
    let start = from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| BookingError::Validation(format!("Invalid date: {from}")))?
        .and_utc();
    let end = (to + Duration::days(1))
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| BookingError::Validation(format!("Invalid date: {to}")))?
        .and_utc();
    Ok((start, end))
}
