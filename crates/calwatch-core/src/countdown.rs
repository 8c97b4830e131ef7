//! Next-event countdown shown in the middle of the face.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::event::CalendarEvent;

/// Whether the next event is still ahead or already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextEventPhase {
    /// The event has not started; the countdown runs to its start.
    Upcoming,
    /// The event is running; the countdown runs to its end.
    Ongoing,
}

/// The event featured in the countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct NextEvent<'a> {
    pub event: &'a CalendarEvent,
    pub phase: NextEventPhase,
    /// Time left until the phase's target, never negative.
    pub remaining: TimeDelta,
}

impl NextEvent<'_> {
    /// Returns the countdown text, e.g. `01:05:00`.
    pub fn countdown(&self) -> String {
        format_countdown(self.remaining)
    }
}

/// Picks the event to count down to from a list in painting order.
///
/// That is the earliest timed event that has not ended yet, scanning the
/// list from its end. Events ending at or before `now` are skipped.
pub fn next_event(events: &[CalendarEvent], now: DateTime<Utc>) -> Option<NextEvent<'_>> {
    let (event, start, end) = events
        .iter()
        .rev()
        .filter(|e| e.is_drawable())
        .filter_map(|e| e.span().map(|(start, end)| (e, start, end)))
        .find(|(_, _, end)| *end > now)?;

    let (phase, target) = if now < start {
        (NextEventPhase::Upcoming, start)
    } else {
        (NextEventPhase::Ongoing, end)
    };

    Some(NextEvent {
        event,
        phase,
        remaining: (target - now).max(TimeDelta::zero()),
    })
}

/// Formats a countdown as `HH:MM:SS`.
///
/// Partial seconds round up, so the display only reads `00:00:00` once
/// nothing is left. Hours are not wrapped at 24.
pub fn format_countdown(remaining: TimeDelta) -> String {
    let millis = remaining.num_milliseconds().max(0);
    let total = (millis + 999) / 1000;
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
