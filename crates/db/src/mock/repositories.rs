use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbProfile, DbSlot, DbSlotWithBooker};
use slotbook_core::models::{profile::Role, slot::NewSlot};

// Mock repositories for testing
mock! {
    pub SlotRepo {
        pub async fn create_slots(
            &self,
            slots: Vec<NewSlot>,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn get_slot_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSlot>>;

        pub async fn list_slots_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbSlot>>;

        pub async fn list_slots_with_booker_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbSlotWithBooker>>;

        pub async fn book_slot(
            &self,
            id: Uuid,
            booked_by: Uuid,
        ) -> eyre::Result<Option<DbSlot>>;

        pub async fn cancel_slot(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSlot>>;

        pub async fn list_bookings_for_profile(
            &self,
            profile_id: Uuid,
        ) -> eyre::Result<Vec<DbSlot>>;
    }
}

mock! {
    pub ProfileRepo {
        pub async fn upsert_profile(
            &self,
            id: Uuid,
            email: Option<&'static str>,
            role: Role,
        ) -> eyre::Result<DbProfile>;

        pub async fn get_profile_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbProfile>>;
    }
}
