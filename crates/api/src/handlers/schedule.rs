//! # Schedule View Handlers
//!
//! Read-side views over the slot table: the per-day half-hour grid and
//! the per-month free/booked tallies. Aggregation itself is pure
//! (`slotbook_core::aggregate`); these handlers fetch the day's or
//! month's slots and project the result for the caller's role.
//!
//! The admin and customer day views are separate endpoints producing
//! separate types from one aggregation. The variant is chosen here, at
//! the boundary, so no downstream code branches on role.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use uuid::Uuid;

use slotbook_core::{
    aggregate,
    errors::BookingError,
    models::{
        schedule_view::{AdminDaySchedule, CustomerDaySchedule, MonthScheduleResponse},
        slot::Slot,
    },
};

use crate::{
    handlers::slots::range_bounds,
    middleware::{auth, auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Customer day grid: 20 cells of availability with the caller's own
/// booking marked. Booker identities are not exposed.
#[axum::debug_handler]
pub async fn my_day_schedule(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<CustomerDaySchedule>, AppError> {
    let (from, to) = range_bounds(date, date)?;
    let slots: Vec<Slot> = slotbook_db::repositories::slot::list_slots_between(
        &state.db_pool,
        from,
        to,
    )
    .await
    .map_err(BookingError::Database)?
    .into_iter()
    .map(Into::into)
    .collect();

    let grid = aggregate::day_grid(date, &slots);

    Ok(Json(CustomerDaySchedule::from_grid(&grid, user.id)))
}

/// Admin day grid: the same 20 cells, with booker emails on booked
/// slots.
#[axum::debug_handler]
pub async fn admin_day_schedule(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<AdminDaySchedule>, AppError> {
    auth::require_admin(&state.db_pool, &user).await?;

    let (from, to) = range_bounds(date, date)?;
    let rows = slotbook_db::repositories::slot::list_slots_with_booker_between(
        &state.db_pool,
        from,
        to,
    )
    .await
    .map_err(BookingError::Database)?;

    let booker_emails: HashMap<Uuid, String> = rows
        .iter()
        .filter_map(|row| row.booker_email.clone().map(|email| (row.id, email)))
        .collect();
    let slots: Vec<Slot> = rows.iter().map(Into::into).collect();

    let grid = aggregate::day_grid(date, &slots);

    Ok(Json(AdminDaySchedule::from_grid(&grid, &booker_emails)))
}

/// Month view: free/booked counts per date, for calendar highlighting.
#[axum::debug_handler]
pub async fn month_schedule(
    State(state): State<Arc<ApiState>>,
    _user: AuthUser,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthScheduleResponse>, AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        BookingError::Validation(format!("Invalid month: {year}-{month:02}"))
    })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| BookingError::Validation(format!("Invalid month: {year}-{month:02}")))?;

    let (from, to) = range_bounds(first, next_first - Duration::days(1))?;
    let slots: Vec<Slot> = slotbook_db::repositories::slot::list_slots_between(
        &state.db_pool,
        from,
        to,
    )
    .await
    .map_err(BookingError::Database)?
    .into_iter()
    .map(Into::into)
    .collect();

    let counts = aggregate::day_counts(&slots);

    Ok(Json(MonthScheduleResponse::from_counts(counts)))
}
