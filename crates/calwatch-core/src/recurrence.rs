//! Recurrence resolution.
//!
//! For an instance of a recurring series the provider reports the first
//! occurrence's start and no end. The occurrence shown on the dial is the
//! one on the anchor's date: same time of day, length taken from the
//! event's duration.

use chrono::TimeZone;
use tracing::debug;

use crate::duration::parse_duration;
use crate::error::NormalizeError;
use crate::event::CalendarEvent;
use crate::time::AnchorHour;

/// Moves a recurring event onto the anchor's date and derives its end.
///
/// Events without a repetition rule are returned unchanged.
pub fn resolve_recurrence<Tz: TimeZone>(
    mut event: CalendarEvent,
    anchor: &AnchorHour<Tz>,
) -> Result<CalendarEvent, NormalizeError> {
    if !event.is_recurring() {
        return Ok(event);
    }

    let Some(first_start) = event.start else {
        return Err(NormalizeError::MissingStart { title: event.title });
    };

    let Some(raw_duration) = event.duration.as_deref().filter(|d| !d.trim().is_empty()) else {
        return Err(NormalizeError::MissingDuration { title: event.title });
    };

    let length = match parse_duration(raw_duration) {
        Ok(length) => length,
        Err(source) => {
            return Err(NormalizeError::Duration {
                title: event.title,
                source,
            });
        }
    };

    let time_of_day = first_start.with_timezone(&anchor.timezone()).time();
    let Some(start) = anchor.on_anchor_date(time_of_day) else {
        return Err(NormalizeError::NonexistentLocalTime {
            local: anchor.date().and_time(time_of_day),
            title: event.title,
        });
    };
    let Some(end) = start.checked_add_signed(length) else {
        return Err(NormalizeError::OutOfRange { title: event.title });
    };

    debug!(title = %event.title, %start, %end, "resolved recurring event");

    event.start = Some(start);
    event.end = Some(end);
    Ok(event)
}
