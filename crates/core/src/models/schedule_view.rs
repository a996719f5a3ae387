//! Role-specific projections of an aggregated day grid.
//!
//! The admin and customer views are distinct types built from the same
//! [`DayGrid`](crate::aggregate::DayGrid); the variant is chosen once at
//! the route boundary, so nothing downstream branches on role.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{DayCounts, DayGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    /// No slot offered at this start time.
    Unavailable,
    Free,
    Booked,
    /// Booked by the viewing customer. Never produced for admin views.
    Mine,
}

/// Customer-facing day view: availability plus an own-booking marker.
/// Booker identities stay hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDaySchedule {
    pub date: NaiveDate,
    pub cells: Vec<CustomerDayCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDayCell {
    pub label: String,
    pub end_label: String,
    pub status: CellStatus,
    pub slot_id: Option<Uuid>,
}

impl CustomerDaySchedule {
    pub fn from_grid(grid: &DayGrid, viewer: Uuid) -> Self {
        let cells = grid
            .cells
            .iter()
            .map(|cell| {
                let (status, slot_id) = match &cell.slot {
                    None => (CellStatus::Unavailable, None),
                    Some(slot) if slot.booked_by == Some(viewer) => {
                        (CellStatus::Mine, Some(slot.id))
                    }
                    Some(slot) if slot.is_booked => (CellStatus::Booked, Some(slot.id)),
                    Some(slot) => (CellStatus::Free, Some(slot.id)),
                };
                CustomerDayCell {
                    label: cell.label.clone(),
                    end_label: cell.end_label.clone(),
                    status,
                    slot_id,
                }
            })
            .collect();

        Self { date: grid.date, cells }
    }
}

/// Admin day view: same grid, with the booker's email on booked cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDaySchedule {
    pub date: NaiveDate,
    pub cells: Vec<AdminDayCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDayCell {
    pub label: String,
    pub end_label: String,
    pub status: CellStatus,
    pub slot_id: Option<Uuid>,
    pub booker_email: Option<String>,
}

impl AdminDaySchedule {
    /// `booker_emails` maps slot id to booker email for booked slots.
    pub fn from_grid(grid: &DayGrid, booker_emails: &HashMap<Uuid, String>) -> Self {
        let cells = grid
            .cells
            .iter()
            .map(|cell| {
                let (status, slot_id, booker_email) = match &cell.slot {
                    None => (CellStatus::Unavailable, None, None),
                    Some(slot) if slot.is_booked => (
                        CellStatus::Booked,
                        Some(slot.id),
                        booker_emails.get(&slot.id).cloned(),
                    ),
                    Some(slot) => (CellStatus::Free, Some(slot.id), None),
                };
                AdminDayCell {
                    label: cell.label.clone(),
                    end_label: cell.end_label.clone(),
                    status,
                    slot_id,
                    booker_email,
                }
            })
            .collect();

        Self { date: grid.date, cells }
    }
}

/// One month-view day: how many slots are free and how many are taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthDay {
    pub date: NaiveDate,
    pub free: usize,
    pub booked: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthScheduleResponse {
    pub days: Vec<MonthDay>,
}

impl MonthScheduleResponse {
    pub fn from_counts(counts: impl IntoIterator<Item = (NaiveDate, DayCounts)>) -> Self {
        let days = counts
            .into_iter()
            .map(|(date, c)| MonthDay { date, free: c.free, booked: c.booked })
            .collect();
        Self { days }
    }
}
