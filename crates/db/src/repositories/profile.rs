use crate::models::DbProfile;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::profile::Role;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Creates the profile row for an identity, or refreshes its email.
/// The role is written only on first insert; later registrations leave
/// it untouched, keeping role changes a manual operation.
pub async fn upsert_profile(
    pool: &Pool<Postgres>,
    id: Uuid,
    email: Option<&str>,
    role: Role,
) -> Result<DbProfile> {
    let now = Utc::now();

    tracing::debug!("Upserting profile: id={}, role={}", id, role);

    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        INSERT INTO reserve_profiles (id, email, role, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        ON CONFLICT (id) DO UPDATE
        SET email = EXCLUDED.email, updated_at = EXCLUDED.updated_at
        RETURNING id, email, role, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(role.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfile>> {
    let profile = sqlx::query_as::<_, DbProfile>(
        r#"
        SELECT id, email, role, created_at, updated_at
        FROM reserve_profiles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}
