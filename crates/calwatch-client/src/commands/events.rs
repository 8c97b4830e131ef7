//! Events command: the normalized event list for the next twelve hours.

use std::io::Write;

use calwatch_core::CalendarEvent;
use calwatch_providers::fetch_events;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::WatchFaceConfig;
use crate::error::ClientResult;

/// Prints the events for `at` (or now) in painting order.
pub fn list(
    config: &WatchFaceConfig,
    at: Option<DateTime<Utc>>,
    json: bool,
    out: &mut impl Write,
) -> ClientResult<()> {
    let now = match at {
        Some(at) => at,
        None => super::default_now(config)?,
    };
    let tz = config.timezone()?;
    let source = config.event_source();
    let events = fetch_events(source.as_ref(), now, &tz);

    if json {
        serde_json::to_writer_pretty(&mut *out, &events)?;
        writeln!(out)?;
        return Ok(());
    }

    if events.is_empty() {
        writeln!(out, "No events in the next 12 hours.")?;
    }
    for event in &events {
        writeln!(out, "{}", event_line(event, &tz))?;
    }
    Ok(())
}

/// One event as `HH:MM-HH:MM title` on the wearer's clock.
pub fn event_line(event: &CalendarEvent, tz: &Tz) -> String {
    let span = match event.span() {
        Some((start, end)) => format!(
            "{}-{}",
            start.with_timezone(tz).format("%H:%M"),
            end.with_timezone(tz).format("%H:%M")
        ),
        None => "--:-----:--".to_string(),
    };
    if event.all_day {
        format!("{span} {} (all day)", event.title)
    } else {
        format!("{span} {}", event.title)
    }
}
