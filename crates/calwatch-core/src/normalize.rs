//! Event normalization: recurrence resolution, window clipping and painting
//! order, applied to everything a source returns before it is drawn.

use chrono::TimeZone;
use tracing::{debug, warn};

use crate::clip::clip_to_window;
use crate::error::NormalizeError;
use crate::event::CalendarEvent;
use crate::order::sort_for_painting;
use crate::recurrence::resolve_recurrence;
use crate::time::AnchorHour;

/// Resolves and clips a single event against the anchor.
pub fn normalize_event<Tz: TimeZone>(
    event: CalendarEvent,
    anchor: &AnchorHour<Tz>,
) -> Result<CalendarEvent, NormalizeError> {
    let event = resolve_recurrence(event, anchor)?;
    Ok(clip_to_window(event, anchor))
}

/// Normalizes a batch of events and sorts it into painting order.
///
/// Events that cannot be normalized are logged and left out; the rest of the
/// batch is unaffected.
pub fn normalize_events<Tz: TimeZone>(
    events: impl IntoIterator<Item = CalendarEvent>,
    anchor: &AnchorHour<Tz>,
) -> Vec<CalendarEvent> {
    let mut dropped = 0usize;
    let mut normalized: Vec<CalendarEvent> = events
        .into_iter()
        .filter_map(|event| match normalize_event(event, anchor) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(title = e.title(), error = %e, "dropping event");
                dropped += 1;
                None
            }
        })
        .collect();

    sort_for_painting(&mut normalized);
    debug!(kept = normalized.len(), dropped, "normalized events");
    normalized
}
