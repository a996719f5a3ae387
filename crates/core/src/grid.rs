//! The canonical half-hour grid for one business day.
//!
//! Business hours run 08:00 inclusive to 18:00 exclusive, so a day has
//! exactly 20 bookable start times: "08:00", "08:30", … "17:30". The end
//! of the last label is "18:00", which is not itself a grid label.

use chrono::{DateTime, Timelike, Utc};

/// First bookable hour of the day (inclusive).
pub const OPEN_HOUR: u32 = 8;
/// End of business (exclusive; no slot starts at this hour).
pub const CLOSE_HOUR: u32 = 18;
/// Fixed duration of every bookable slot, in minutes.
pub const SLOT_MINUTES: i64 = 30;

/// The ordered `HH:MM` start labels of one business day.
pub fn grid_labels() -> Vec<String> {
    let mut labels = Vec::with_capacity(((CLOSE_HOUR - OPEN_HOUR) * 2) as usize);
    for hour in OPEN_HOUR..CLOSE_HOUR {
        labels.push(format!("{hour:02}:00"));
        labels.push(format!("{hour:02}:30"));
    }
    labels
}

/// Parses an `H:MM` / `HH:MM` label into (hour, minute).
///
/// The hour part is one or two digits, the minute part exactly two, and
/// both must land on the clock (hour < 24, minute < 60).
pub fn parse_label(label: &str) -> Option<(u32, u32)> {
    let (hour_part, minute_part) = label.split_once(':')?;
    if hour_part.is_empty()
        || hour_part.len() > 2
        || minute_part.len() != 2
        || !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;
    if hour >= 24 || minute >= 60 {
        return None;
    }
    Some((hour, minute))
}

/// The end label paired with a grid label: label + 30 minutes.
///
/// "17:30" ends at "18:00" even though "18:00" is not a grid label.
pub fn label_end(label: &str) -> Option<String> {
    let (hour, minute) = parse_label(label)?;
    let (end_hour, end_minute) = if minute >= 30 {
        (hour + 1, minute - 30)
    } else {
        (hour, minute + 30)
    };
    Some(format!("{end_hour:02}:{end_minute:02}"))
}

/// The grid label a persisted slot occupies: the `HH:MM` of its start.
pub fn slot_start_label(start_time: &DateTime<Utc>) -> String {
    format!("{:02}:{:02}", start_time.hour(), start_time.minute())
}
