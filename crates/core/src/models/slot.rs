use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable 30-minute interval. `is_booked` and `booked_by` move
/// together: a slot is booked iff `booked_by` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub booked_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A slot record not yet persisted, produced by the creation validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Admin scheduling intent for one date: either a list of start times
/// (each becoming one fixed-duration slot) or a single start/end range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotsRequest {
    pub date: NaiveDate,
    pub times: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotsResponse {
    pub created: usize,
    pub slots: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
}

impl From<&Slot> for SlotResponse {
    fn from(slot: &Slot) -> Self {
        Self {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            is_booked: slot.is_booked,
        }
    }
}

/// Admin listing row: a slot plus the booker's email when booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWithBookerResponse {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    pub booker_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSlotsResponse {
    pub slots: Vec<SlotWithBookerResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyBookingsResponse {
    pub bookings: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleCalendarLinkResponse {
    pub url: String,
}
