//! Painting order for event arcs.
//!
//! Arcs are painted latest-first so that earlier, more relevant events end up
//! on top of the stack.

use std::cmp::Ordering;

use crate::event::CalendarEvent;

/// Compares two events for painting: later starts first.
///
/// Events without a start tie with each other and sort after every event
/// that has one.
pub fn compare_for_painting(a: &CalendarEvent, b: &CalendarEvent) -> Ordering {
    match (a.start, b.start) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts events in place into painting order. The sort is stable.
pub fn sort_for_painting(events: &mut [CalendarEvent]) {
    events.sort_by(compare_for_painting);
}

/// Returns the events in painting order.
pub fn painting_order(mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    sort_for_painting(&mut events);
    events
}
