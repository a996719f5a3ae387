//! Calendar export helpers: a Google Calendar deep link and an RFC 5545
//! payload for a booked slot. Pure functions; the caller supplies the
//! uid and timestamp so output is deterministic.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub details: Option<String>,
    pub location: Option<String>,
}

/// UTC instant in the compact calendar form, e.g. `20250602T090000Z`.
fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// A prefilled Google Calendar "add event" link.
pub fn google_calendar_url(event: &CalendarEvent) -> String {
    let dates = format!("{}/{}", format_utc(&event.start), format_utc(&event.end));
    let params = [
        ("action", "TEMPLATE"),
        ("text", event.title.as_str()),
        ("dates", dates.as_str()),
        ("details", event.details.as_deref().unwrap_or("")),
        ("location", event.location.as_deref().unwrap_or("")),
    ];
    // Serializing a fixed slice of pairs cannot fail.
    let query = serde_urlencoded::to_string(params).unwrap_or_default();
    format!("https://www.google.com/calendar/render?{query}")
}

/// A single-event VCALENDAR document with CRLF line endings.
pub fn ics_content(event: &CalendarEvent, uid: &str, dtstamp: DateTime<Utc>) -> String {
    let description = event
        .details
        .as_deref()
        .unwrap_or("")
        .replace('\n', "\\n");
    let location = event.location.as_deref().unwrap_or("");

    [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Slotbook//Booking//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{}", format_utc(&dtstamp)),
        format!("DTSTART:{}", format_utc(&event.start)),
        format!("DTEND:{}", format_utc(&event.end)),
        format!("SUMMARY:{}", event.title),
        format!("DESCRIPTION:{description}"),
        format!("LOCATION:{location}"),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]
    .join("\r\n")
}
