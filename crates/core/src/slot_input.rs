//! Validation of administrator scheduling intent.
//!
//! Two accepted shapes for one date: a list of start-time tokens, each
//! becoming one 30-minute slot, or a single start/end range becoming one
//! slot spanning it. Validation rejects the whole batch on any bad
//! token; nothing is partially created.

use chrono::{Duration, NaiveDate, Utc};

use crate::errors::{BookingError, BookingResult};
use crate::grid::{parse_label, SLOT_MINUTES};
use crate::models::slot::NewSlot;

/// Builds the concrete slot records for one date from admin input.
///
/// Preference order matches the form: a non-blank `times` list wins over
/// the start/end pair; with neither, the caller is prompted for input.
/// Every returned record satisfies `end_time > start_time`.
pub fn build_slots(
    date: NaiveDate,
    times: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> BookingResult<Vec<NewSlot>> {
    if let Some(times) = times.filter(|t| !t.trim().is_empty()) {
        return slots_from_times(date, times);
    }

    match (start_time, end_time) {
        (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => {
            slot_from_range(date, start, end).map(|slot| vec![slot])
        }
        _ => Err(BookingError::Validation(
            "Provide a start and end time, or a list of times (e.g. 9:00, 10:00)".to_string(),
        )),
    }
}

fn slots_from_times(date: NaiveDate, times: &str) -> BookingResult<Vec<NewSlot>> {
    let tokens: Vec<&str> = times
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        // A list of nothing but separators is no list at all.
        return Err(BookingError::Validation(
            "Provide a start and end time, or a list of times (e.g. 9:00, 10:00)".to_string(),
        ));
    }

    let mut parsed = Vec::with_capacity(tokens.len());
    let mut invalid = Vec::new();
    for token in &tokens {
        match parse_label(token) {
            Some(time) => parsed.push((*token, time)),
            None => invalid.push(*token),
        }
    }
    if !invalid.is_empty() {
        return Err(BookingError::Validation(format!(
            "Invalid time format: {}",
            invalid.join(", ")
        )));
    }

    let mut slots = Vec::with_capacity(parsed.len());
    let mut seen = Vec::with_capacity(parsed.len());
    for (token, (hour, minute)) in parsed {
        if seen.contains(&(hour, minute)) {
            return Err(BookingError::Validation(format!(
                "Duplicate start time: {token}"
            )));
        }
        seen.push((hour, minute));

        let start = date_time_utc(date, hour, minute)?;
        slots.push(NewSlot {
            start_time: start,
            end_time: start + Duration::minutes(SLOT_MINUTES),
        });
    }

    Ok(slots)
}

fn slot_from_range(date: NaiveDate, start: &str, end: &str) -> BookingResult<NewSlot> {
    let (start_hour, start_minute) = parse_label(start).ok_or_else(|| {
        BookingError::Validation(format!("Invalid time format: {start}"))
    })?;
    let (end_hour, end_minute) = parse_label(end)
        .ok_or_else(|| BookingError::Validation(format!("Invalid time format: {end}")))?;

    let start_time = date_time_utc(date, start_hour, start_minute)?;
    let end_time = date_time_utc(date, end_hour, end_minute)?;
    if end_time <= start_time {
        return Err(BookingError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(NewSlot { start_time, end_time })
}

fn date_time_utc(date: NaiveDate, hour: u32, minute: u32) -> BookingResult<chrono::DateTime<Utc>> {
    date.and_hms_opt(hour, minute, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            BookingError::Validation(format!("Invalid time of day: {hour:02}:{minute:02}"))
        })
}
