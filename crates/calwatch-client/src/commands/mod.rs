//! Subcommand implementations.

pub mod config;
pub mod events;
pub mod render;
pub mod run;

use calwatch_face::{BatteryLevel, SystemEventBus, WatchFaceEngine};
use calwatch_providers::{DEMO_BATTERY_LEVEL, demo_now};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::WatchFaceConfig;
use crate::error::ClientResult;

/// Builds a visible engine from the configuration.
pub fn build_engine(config: &WatchFaceConfig, ambient: bool) -> ClientResult<WatchFaceEngine> {
    let timezone = config.timezone()?;
    let source = config.event_source();
    debug!(source = source.name(), timezone = timezone.name(), ambient, "building engine");

    let mut engine = WatchFaceEngine::new(
        config.engine_config(),
        source,
        timezone,
        SystemEventBus::new(),
    );
    if config.source.demo {
        engine = engine.with_battery(BatteryLevel::new(DEMO_BATTERY_LEVEL, 100));
    }
    engine.on_properties_changed(config.face.low_bit_ambient);
    engine.on_visibility_changed(true);
    engine.on_ambient_mode_changed(ambient);
    Ok(engine)
}

/// The instant to draw when none was given: the demo clock in demo mode,
/// the system clock otherwise.
pub fn default_now(config: &WatchFaceConfig) -> ClientResult<DateTime<Utc>> {
    if config.source.demo {
        Ok(demo_now()?)
    } else {
        Ok(Utc::now())
    }
}
