//! The per-frame fetch pipeline: query, convert, normalize, sort.

use calwatch_core::{AnchorHour, CalendarEvent, InstanceWindow, normalize_events};
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::row::EventRow;
use crate::source::EventSource;

/// Fetches the events to paint for `now`.
///
/// Queries `[now, now + 12h)`, converts the rows, normalizes them against
/// the anchor hour in `tz` and returns them in painting order. A failing
/// source is logged and yields an empty list so the face still renders.
pub fn fetch_events<Tz: TimeZone>(
    source: &dyn EventSource,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<CalendarEvent> {
    let window = InstanceWindow::lookahead(now);
    let rows = match source.query_instances(&window) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(source = source.name(), error = %e, "event query failed");
            return Vec::new();
        }
    };
    debug!(source = source.name(), rows = rows.len(), "queried instances");

    let anchor = AnchorHour::floor(now, tz);
    normalize_events(rows.into_iter().map(EventRow::into_event), &anchor)
}
