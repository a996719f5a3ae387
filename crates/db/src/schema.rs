use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create reserve_profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reserve_profiles (
            id UUID PRIMARY KEY,
            email VARCHAR(255) NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'customer',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('admin', 'customer'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reserve_slots table. The booked_consistency check keeps
    // is_booked and booked_by moving together; the unique start_time
    // index rejects duplicate slot creation.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reserve_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            is_booked BOOLEAN NOT NULL DEFAULT FALSE,
            booked_by UUID NULL REFERENCES reserve_profiles(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT booked_consistency CHECK (is_booked = (booked_by IS NOT NULL))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_reserve_slots_start_time ON reserve_slots(start_time);
        CREATE INDEX IF NOT EXISTS idx_reserve_slots_booked_by ON reserve_slots(booked_by);
        CREATE INDEX IF NOT EXISTS idx_reserve_profiles_email ON reserve_profiles(email);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
