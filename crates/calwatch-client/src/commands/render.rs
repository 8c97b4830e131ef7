//! Render command: draw one frame and print it.

use std::fmt;
use std::io::Write;

use calwatch_core::next_event;
use calwatch_face::{Frame, WatchFaceEngine};
use chrono::{DateTime, Utc};

use super::events::event_line;
use crate::config::WatchFaceConfig;
use crate::error::ClientResult;

/// Renders the frame for `at` (or now) as a summary or JSON draw commands.
pub fn render(
    config: &WatchFaceConfig,
    at: Option<DateTime<Utc>>,
    json: bool,
    ambient: bool,
    out: &mut impl Write,
) -> ClientResult<()> {
    let now = match at {
        Some(at) => at,
        None => super::default_now(config)?,
    };
    let mut engine = super::build_engine(config, ambient)?;
    let frame = engine.draw(now);

    if json {
        serde_json::to_writer_pretty(&mut *out, &frame)?;
        writeln!(out)?;
    } else {
        write!(
            out,
            "{}",
            Summary {
                engine: &engine,
                now,
                frame: &frame,
            }
        )?;
    }
    Ok(())
}

/// Human-readable description of a drawn frame.
pub struct Summary<'a> {
    pub engine: &'a WatchFaceEngine,
    pub now: DateTime<Utc>,
    pub frame: &'a Frame,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.engine;
        let tz = engine.timezone();
        let mode = engine.display_mode();
        let battery = engine.battery();

        writeln!(
            f,
            "{} {}",
            self.now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S"),
            tz.name()
        )?;
        writeln!(
            f,
            "mode: {}{}",
            if mode.ambient { "ambient" } else { "interactive" },
            if mode.mute { " (muted)" } else { "" }
        )?;
        if battery.is_known() {
            writeln!(f, "battery: {}%", battery.level * 100 / battery.scale)?;
        } else {
            writeln!(f, "battery: unknown")?;
        }

        writeln!(f, "events:")?;
        if engine.events().is_empty() {
            writeln!(f, "  none")?;
        }
        for event in engine.events() {
            writeln!(f, "  {}", event_line(event, &tz))?;
        }

        if let Some(next) = next_event(engine.events(), self.now) {
            let message = engine
                .config()
                .language
                .next_event_message(&next.event.title, next.phase);
            writeln!(f, "next: {} {}", next.countdown(), message)?;
        }
        writeln!(f, "commands: {}", self.frame.len())
    }
}
