//! Run command: redraw on the face's own cadence until interrupted.

use std::future::Future;
use std::io::Write;

use calwatch_core::next_event;
use calwatch_face::WatchFaceEngine;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::config::WatchFaceConfig;
use crate::error::ClientResult;

/// Wall clock for the loop. In demo mode it starts at the demo instant and
/// advances with real time.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    base: Option<DateTime<Utc>>,
    started: Instant,
}

impl Clock {
    pub fn system() -> Self {
        Self {
            base: None,
            started: Instant::now(),
        }
    }

    pub fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            base: Some(base),
            started: Instant::now(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self.base {
            Some(base) => {
                base + TimeDelta::from_std(self.started.elapsed()).unwrap_or(TimeDelta::zero())
            }
            None => Utc::now(),
        }
    }
}

/// Draws frames until `frames` have been drawn or Ctrl-C.
pub async fn run(
    config: &WatchFaceConfig,
    frames: Option<u64>,
    ambient: bool,
    out: &mut impl Write,
) -> ClientResult<u64> {
    let mut engine = super::build_engine(config, ambient)?;
    let clock = if config.source.demo {
        Clock::starting_at(super::default_now(config)?)
    } else {
        Clock::system()
    };
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            debug!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    tick_loop(&mut engine, clock, frames, shutdown, out).await
}

/// The tick loop itself, one status line per frame.
///
/// Each frame waits for the engine's next aligned tick, drains system
/// events, refetches and renders. Returns the number of frames drawn.
pub async fn tick_loop(
    engine: &mut WatchFaceEngine,
    clock: Clock,
    frames: Option<u64>,
    shutdown: impl Future<Output = ()>,
    out: &mut impl Write,
) -> ClientResult<u64> {
    tokio::pin!(shutdown);
    let mut drawn = 0;

    loop {
        if frames.is_some_and(|max| drawn >= max) {
            break;
        }
        let Some(delay) = engine.next_tick_delay(clock.now()) else {
            debug!("face hidden, stopping");
            break;
        };

        tokio::select! {
            _ = &mut shutdown => {
                info!(drawn, "interrupted");
                break;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        let now = clock.now();
        let frame = engine.draw(now);
        debug!(commands = frame.len(), events = engine.events().len(), "tick");
        writeln!(out, "{}", status_line(engine, now))?;
        out.flush()?;
        drawn += 1;
    }

    Ok(drawn)
}

/// `HH:MM:SS` on the wearer's clock followed by the countdown caption.
pub fn status_line(engine: &WatchFaceEngine, now: DateTime<Utc>) -> String {
    let time = now.with_timezone(&engine.timezone()).format("%H:%M:%S");
    match next_event(engine.events(), now) {
        Some(next) => {
            let message = engine
                .config()
                .language
                .next_event_message(&next.event.title, next.phase);
            format!("{time} {} {message}", next.countdown())
        }
        None => format!("{time} no upcoming events"),
    }
}
