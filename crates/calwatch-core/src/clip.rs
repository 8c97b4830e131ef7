//! Clipping events to the visible twelve hours of the dial.

use chrono::TimeZone;
use tracing::trace;

use crate::event::CalendarEvent;
use crate::time::{AnchorHour, VISIBLE_HOURS, floor_to_hour};

/// Clips an event's span to `[anchor, anchor + 12h]`.
///
/// Both rules compare whole hours after flooring the instant to its hour:
/// - a start one or more hours before the anchor becomes the anchor
/// - an end twelve or more hours after the anchor becomes the horizon
///
/// A start beyond the horizon is pulled back to it, and an end before the
/// start is pulled forward to the start, so a clipped span is never
/// inverted. An end past the horizon is pulled back to it, which matters on
/// days where a daylight-saving change shortens the twelve wall-clock hours.
/// Missing instants are left missing.
pub fn clip_to_window<Tz: TimeZone>(
    mut event: CalendarEvent,
    anchor: &AnchorHour<Tz>,
) -> CalendarEvent {
    let tz = anchor.timezone();
    let horizon = anchor.horizon();

    if let Some(start) = event.start {
        let hours = anchor.hours_until(floor_to_hour(start, &tz));
        if hours <= -1 {
            trace!(title = %event.title, %start, "start clipped to anchor");
            event.start = Some(anchor.instant());
        } else if start > horizon {
            event.start = Some(horizon);
        }
    }

    if let Some(end) = event.end {
        let hours = anchor.hours_until(floor_to_hour(end, &tz));
        if hours >= VISIBLE_HOURS {
            trace!(title = %event.title, %end, "end clipped to horizon");
            event.end = Some(horizon);
        }
    }

    if let Some((start, end)) = event.span() {
        if end < start {
            event.end = Some(start);
        } else if end > horizon {
            trace!(title = %event.title, %end, "end clipped to shortened horizon");
            event.end = Some(horizon);
        }
    }

    event
}
