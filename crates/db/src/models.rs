use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use slotbook_core::models::{
    profile::{Profile, Role},
    slot::Slot,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub booked_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A slot row joined with the booker's profile email, for admin listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotWithBooker {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub booked_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub booker_email: Option<String>,
}

impl TryFrom<DbProfile> for Profile {
    type Error = String;

    fn try_from(row: DbProfile) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>()?;
        Ok(Profile {
            id: row.id,
            email: row.email,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Slot {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            booked_by: row.booked_by,
            created_at: row.created_at,
        }
    }
}

impl From<&DbSlotWithBooker> for Slot {
    fn from(row: &DbSlotWithBooker) -> Self {
        Slot {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            booked_by: row.booked_by,
            created_at: row.created_at,
        }
    }
}
