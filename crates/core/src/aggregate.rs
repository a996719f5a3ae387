//! Read-side aggregation: maps flat slot records onto the day grid and
//! onto calendar dates for the month view. Pure transforms, no I/O.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::grid::{grid_labels, label_end, slot_start_label};
use crate::models::slot::Slot;

/// One grid row of a day schedule: a start/end label pair and the slot
/// occupying that start time, if one is offered.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub label: String,
    pub end_label: String,
    pub slot: Option<Slot>,
}

/// A full business day mapped onto the 20-cell grid.
#[derive(Debug, Clone)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub cells: Vec<GridCell>,
}

/// Maps the slots of one day onto the canonical grid.
///
/// Slots on other dates are ignored. A cell with no matching slot means
/// that start time is not offered. Two slots sharing a start time is a
/// data-integrity condition prevented upstream (validator + unique
/// index); should one slip through, the first-seen record wins.
pub fn day_grid(date: NaiveDate, slots: &[Slot]) -> DayGrid {
    let mut by_label: HashMap<String, &Slot> = HashMap::new();
    for slot in slots {
        if slot.start_time.date_naive() != date {
            continue;
        }
        by_label.entry(slot_start_label(&slot.start_time)).or_insert(slot);
    }

    let cells = grid_labels()
        .into_iter()
        .map(|label| {
            let end_label = label_end(&label).unwrap_or_default();
            let slot = by_label.get(&label).map(|s| (*s).clone());
            GridCell { label, end_label, slot }
        })
        .collect();

    DayGrid { date, cells }
}

/// Free/booked tally for one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCounts {
    pub free: usize,
    pub booked: usize,
}

impl DayCounts {
    pub fn total(&self) -> usize {
        self.free + self.booked
    }
}

/// Buckets slots by their start date and tallies free vs booked per day.
/// Every slot lands on exactly one date, so per-day totals sum to the
/// input length.
pub fn day_counts(slots: &[Slot]) -> BTreeMap<NaiveDate, DayCounts> {
    let mut counts: BTreeMap<NaiveDate, DayCounts> = BTreeMap::new();
    for slot in slots {
        let entry = counts.entry(slot.start_time.date_naive()).or_default();
        if slot.is_booked {
            entry.booked += 1;
        } else {
            entry.free += 1;
        }
    }
    counts
}
