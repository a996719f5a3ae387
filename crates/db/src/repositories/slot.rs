use crate::models::{DbSlot, DbSlotWithBooker};
use chrono::{DateTime, Utc};
use eyre::Result;
use slotbook_core::models::slot::NewSlot;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Inserts a validated batch as one multi-row statement, so the batch is
/// all-or-nothing at the store.
pub async fn create_slots(pool: &Pool<Postgres>, slots: &[NewSlot]) -> Result<Vec<DbSlot>> {
    let now = Utc::now();

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO reserve_slots (id, start_time, end_time, is_booked, created_at) ");
    builder.push_values(slots, |mut row, slot| {
        row.push_bind(Uuid::new_v4())
            .push_bind(slot.start_time)
            .push_bind(slot.end_time)
            .push_bind(false)
            .push_bind(now);
    });
    builder.push(" RETURNING id, start_time, end_time, is_booked, booked_by, created_at");

    let created = builder.build_query_as::<DbSlot>().fetch_all(pool).await?;

    Ok(created)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, is_booked, booked_by, created_at
        FROM reserve_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn list_slots_between(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, is_booked, booked_by, created_at
        FROM reserve_slots
        WHERE start_time >= $1 AND start_time < $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn list_slots_with_booker_between(
    pool: &Pool<Postgres>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbSlotWithBooker>> {
    let slots = sqlx::query_as::<_, DbSlotWithBooker>(
        r#"
        SELECT s.id, s.start_time, s.end_time, s.is_booked, s.booked_by, s.created_at,
               p.email AS booker_email
        FROM reserve_slots s
        LEFT JOIN reserve_profiles p ON p.id = s.booked_by
        WHERE s.start_time >= $1 AND s.start_time < $2
        ORDER BY s.start_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// The FREE -> BOOKED transition as one conditional write. The filter on
/// `is_booked = FALSE` makes the check and the update indivisible;
/// `None` means the guard did not match (already booked, or no such
/// slot) and the caller decides which.
pub async fn book_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    booked_by: Uuid,
) -> Result<Option<DbSlot>> {
    tracing::debug!("Booking slot {} for {}", id, booked_by);

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        UPDATE reserve_slots
        SET is_booked = TRUE, booked_by = $2
        WHERE id = $1 AND is_booked = FALSE
        RETURNING id, start_time, end_time, is_booked, booked_by, created_at
        "#,
    )
    .bind(id)
    .bind(booked_by)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Releases a slot back to FREE. Unconditional once the caller has
/// authorized it; returns `None` when the slot does not exist.
pub async fn cancel_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    tracing::debug!("Cancelling booking on slot {}", id);

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        UPDATE reserve_slots
        SET is_booked = FALSE, booked_by = NULL
        WHERE id = $1
        RETURNING id, start_time, end_time, is_booked, booked_by, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn list_bookings_for_profile(
    pool: &Pool<Postgres>,
    profile_id: Uuid,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, start_time, end_time, is_booked, booked_by, created_at
        FROM reserve_slots
        WHERE booked_by = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(profile_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
