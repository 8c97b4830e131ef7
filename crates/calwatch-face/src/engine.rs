//! The watch face engine.
//!
//! [`WatchFaceEngine`] owns the state that outlives a frame: visibility,
//! display mode, wearer time zone, battery and the last event list. The
//! host drives it through the `on_*` lifecycle callbacks and calls
//! [`WatchFaceEngine::draw`] whenever a frame is due.

use std::time::Duration;

use calwatch_core::CalendarEvent;
use calwatch_providers::{EventSource, fetch_events};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, trace};

use crate::context::{BatteryLevel, DisplayMode, Language, RenderContext};
use crate::layers::render;
use crate::primitives::Frame;
use crate::system_events::{Subscription, SystemEvent, SystemEventBus};
use crate::ticker::{AMBIENT_UPDATE, INTERACTIVE_UPDATE, TickMode, aligned_delay};

/// Fixed settings for an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub language: Language,
    /// Initial low-bit ambient flag, until the device reports its own.
    pub low_bit_ambient: bool,
    pub interactive_update: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
            language: Language::default(),
            low_bit_ambient: false,
            interactive_update: INTERACTIVE_UPDATE,
        }
    }
}

/// Notification filter set by the wearer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterruptionFilter {
    #[default]
    All,
    Priority,
    Alarms,
    /// Nothing gets through; the face dims its hands.
    None,
}

pub struct WatchFaceEngine {
    config: EngineConfig,
    source: Box<dyn EventSource>,
    timezone: Tz,
    battery: BatteryLevel,
    visible: bool,
    ambient: bool,
    low_bit_ambient: bool,
    mute: bool,
    bus: SystemEventBus,
    subscription: Option<Subscription>,
    events: Vec<CalendarEvent>,
}

impl std::fmt::Debug for WatchFaceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchFaceEngine")
            .field("source", &self.source.name())
            .field("timezone", &self.timezone)
            .field("battery", &self.battery)
            .field("visible", &self.visible)
            .field("ambient", &self.ambient)
            .field("mute", &self.mute)
            .field("events", &self.events.len())
            .finish()
    }
}

impl WatchFaceEngine {
    /// Creates a hidden, interactive engine.
    pub fn new(
        config: EngineConfig,
        source: Box<dyn EventSource>,
        timezone: Tz,
        bus: SystemEventBus,
    ) -> Self {
        let low_bit_ambient = config.low_bit_ambient;
        Self {
            config,
            source,
            timezone,
            battery: BatteryLevel::default(),
            visible: false,
            ambient: false,
            low_bit_ambient,
            mute: false,
            bus,
            subscription: None,
            events: Vec::new(),
        }
    }

    /// Starts with a known battery level instead of waiting for a report.
    #[must_use]
    pub fn with_battery(mut self, battery: BatteryLevel) -> Self {
        self.battery = battery;
        self
    }

    /// Subscribes to system events while visible and drops the
    /// subscription when hidden.
    pub fn on_visibility_changed(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.subscription = Some(self.bus.subscribe());
        } else {
            self.subscription = None;
        }
        debug!(visible, tick = ?self.tick_mode(), "visibility changed");
    }

    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if ambient == self.ambient {
            return;
        }
        self.ambient = ambient;
        debug!(ambient, anti_alias = self.display_mode().anti_alias(), "ambient mode changed");
    }

    /// Device properties, reported once after creation.
    pub fn on_properties_changed(&mut self, low_bit_ambient: bool) {
        self.low_bit_ambient = low_bit_ambient;
        debug!(low_bit_ambient, "device properties changed");
    }

    pub fn on_interruption_filter_changed(&mut self, filter: InterruptionFilter) {
        let mute = filter == InterruptionFilter::None;
        if mute != self.mute {
            self.mute = mute;
            debug!(?filter, mute, "interruption filter changed");
        }
    }

    pub fn tick_mode(&self) -> TickMode {
        match (self.visible, self.ambient) {
            (false, _) => TickMode::Stopped,
            (true, true) => TickMode::Ambient,
            (true, false) => TickMode::Interactive,
        }
    }

    /// Whether the face's own fast timer should run.
    pub fn should_tick(&self) -> bool {
        self.tick_mode() == TickMode::Interactive
    }

    /// Delay until the next frame, aligned to the period boundary, or
    /// `None` while hidden.
    pub fn next_tick_delay(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.tick_mode() {
            TickMode::Interactive => Some(aligned_delay(now, self.config.interactive_update)),
            TickMode::Ambient => Some(aligned_delay(now, AMBIENT_UPDATE)),
            TickMode::Stopped => None,
        }
    }

    /// Applies a system event to the engine state.
    pub fn apply(&mut self, event: SystemEvent) {
        match event {
            SystemEvent::TimeZoneChanged(tz) => {
                debug!(from = %self.timezone.name(), to = %tz.name(), "time zone changed");
                self.timezone = tz;
            }
            SystemEvent::BatteryChanged { level, scale } => {
                trace!(level, scale, "battery changed");
                self.battery = BatteryLevel::new(level, scale);
            }
        }
    }

    /// Draws the frame for `now`.
    ///
    /// Pending system events are applied first, then the event list is
    /// refetched and normalized against the current hour.
    pub fn draw(&mut self, now: DateTime<Utc>) -> Frame {
        let pending = match self.subscription.as_mut() {
            Some(sub) => sub.drain(),
            None => Vec::new(),
        };
        for event in pending {
            self.apply(event);
        }

        self.events = fetch_events(self.source.as_ref(), now, &self.timezone);

        let ctx = RenderContext::new(
            self.config.width,
            self.config.height,
            self.display_mode(),
            now.with_timezone(&self.timezone),
            &self.events,
        )
        .with_language(self.config.language)
        .with_battery(self.battery);
        let frame = render(&ctx);
        trace!(events = self.events.len(), commands = frame.len(), "frame drawn");
        frame
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode {
            ambient: self.ambient,
            low_bit_ambient: self.low_bit_ambient,
            mute: self.mute,
        }
    }

    /// Events from the last [`draw`](Self::draw), in painting order.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn battery(&self) -> BatteryLevel {
        self.battery
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::DrawCommand;
    use calwatch_providers::{
        DEMO_BATTERY_LEVEL, DEMO_TIMEZONE, DemoSource, ErrorSource, ProviderError, StaticSource,
        demo_now,
    };
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn demo_engine(bus: &SystemEventBus) -> WatchFaceEngine {
        WatchFaceEngine::new(
            EngineConfig::default(),
            Box::new(DemoSource),
            DEMO_TIMEZONE,
            bus.clone(),
        )
        .with_battery(BatteryLevel::new(DEMO_BATTERY_LEVEL, 100))
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn starts_hidden_and_stopped() {
            let engine = demo_engine(&SystemEventBus::new());
            assert!(!engine.is_visible());
            assert!(!engine.is_subscribed());
            assert_eq!(engine.tick_mode(), TickMode::Stopped);
            assert!(!engine.should_tick());
            assert_eq!(engine.next_tick_delay(utc(2015, 5, 27, 1, 8, 36)), None);
        }

        #[test]
        fn visibility_controls_subscription() {
            let bus = SystemEventBus::new();
            let mut engine = demo_engine(&bus);

            engine.on_visibility_changed(true);
            assert!(engine.is_subscribed());
            assert_eq!(bus.subscriber_count(), 1);

            engine.on_visibility_changed(true);
            assert_eq!(bus.subscriber_count(), 1);

            engine.on_visibility_changed(false);
            assert!(!engine.is_subscribed());
            assert_eq!(bus.subscriber_count(), 0);
        }

        #[test]
        fn ambient_switches_cadence() {
            let mut engine = demo_engine(&SystemEventBus::new());
            engine.on_visibility_changed(true);
            assert!(engine.should_tick());

            engine.on_ambient_mode_changed(true);
            assert!(!engine.should_tick());
            assert_eq!(engine.tick_mode(), TickMode::Ambient);
            assert_eq!(
                engine.next_tick_delay(utc(2015, 5, 27, 1, 8, 36)),
                Some(Duration::from_secs(24))
            );

            engine.on_ambient_mode_changed(false);
            assert!(engine.should_tick());
        }

        #[test]
        fn interactive_delay_uses_configured_period() {
            let config = EngineConfig {
                interactive_update: Duration::from_secs(5),
                ..EngineConfig::default()
            };
            let mut engine =
                WatchFaceEngine::new(config, Box::new(DemoSource), DEMO_TIMEZONE, SystemEventBus::new());
            engine.on_visibility_changed(true);
            assert_eq!(
                engine.next_tick_delay(utc(2015, 5, 27, 1, 8, 36)),
                Some(Duration::from_secs(4))
            );
        }

        #[test]
        fn only_none_filter_mutes() {
            let mut engine = demo_engine(&SystemEventBus::new());
            engine.on_interruption_filter_changed(InterruptionFilter::Priority);
            assert!(!engine.display_mode().mute);
            engine.on_interruption_filter_changed(InterruptionFilter::None);
            assert!(engine.display_mode().mute);
            engine.on_interruption_filter_changed(InterruptionFilter::All);
            assert!(!engine.display_mode().mute);
        }

        #[test]
        fn low_bit_needs_ambient() {
            let mut engine = demo_engine(&SystemEventBus::new());
            engine.on_properties_changed(true);
            assert!(engine.display_mode().anti_alias());
            engine.on_ambient_mode_changed(true);
            assert!(!engine.display_mode().anti_alias());
        }
    }

    mod system_events {
        use super::*;

        #[test]
        fn events_applied_at_draw() {
            let bus = SystemEventBus::new();
            let mut engine = demo_engine(&bus);
            engine.on_visibility_changed(true);

            bus.publish(SystemEvent::BatteryChanged { level: 80, scale: 100 });
            bus.publish(SystemEvent::TimeZoneChanged(chrono_tz::UTC));
            assert_eq!(engine.battery(), BatteryLevel::new(DEMO_BATTERY_LEVEL, 100));

            engine.draw(demo_now().unwrap());
            assert_eq!(engine.battery(), BatteryLevel::new(80, 100));
            assert_eq!(engine.timezone(), chrono_tz::UTC);
        }

        #[test]
        fn hidden_engine_misses_events() {
            let bus = SystemEventBus::new();
            let mut engine = demo_engine(&bus);

            bus.publish(SystemEvent::BatteryChanged { level: 80, scale: 100 });
            engine.on_visibility_changed(true);
            engine.draw(demo_now().unwrap());
            assert_eq!(engine.battery().level, DEMO_BATTERY_LEVEL);
        }
    }

    mod draw {
        use super::*;

        #[test]
        fn demo_frame() {
            let mut engine = demo_engine(&SystemEventBus::new());
            engine.on_visibility_changed(true);
            let frame = engine.draw(demo_now().unwrap());

            let titles: Vec<_> = engine.events().iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, ["Bさんと食事", "A社へ訪問", "打ち合わせ"]);
            insta::assert_snapshot!(frame.texts().join("\n"), @r"
            Bさんと食事
            A社へ訪問
            打ち合わせ
            00:51:24
            until 打ち合わせ
            27
            Wed
            ");
        }

        #[test]
        fn ambient_frame_has_no_text() {
            let mut engine = demo_engine(&SystemEventBus::new());
            engine.on_visibility_changed(true);
            engine.on_ambient_mode_changed(true);
            let frame = engine.draw(demo_now().unwrap());
            assert!(frame.texts().is_empty());
            assert!(matches!(
                frame.commands.first(),
                Some(DrawCommand::Clear { color }) if *color == calwatch_core::Color::BLACK
            ));
            assert_eq!(engine.events().len(), 3);
        }

        #[test]
        fn failing_source_still_draws_dial() {
            let source = ErrorSource::new("broken", ProviderError::unavailable("offline"));
            let mut engine = WatchFaceEngine::new(
                EngineConfig::default(),
                Box::new(source),
                chrono_tz::UTC,
                SystemEventBus::new(),
            );
            let frame = engine.draw(utc(2015, 5, 27, 1, 8, 36));
            assert!(engine.events().is_empty());
            assert_eq!(frame.texts(), ["27", "Wed"]);
        }

        #[test]
        fn events_refetched_each_frame() {
            let start = utc(2015, 5, 27, 2, 0, 0);
            let source = StaticSource::new(vec![calwatch_providers::EventRow::timed(
                "Standup",
                start,
                start + chrono::TimeDelta::minutes(15),
            )]);
            let mut engine = WatchFaceEngine::new(
                EngineConfig::default(),
                Box::new(source),
                chrono_tz::UTC,
                SystemEventBus::new(),
            );

            engine.draw(utc(2015, 5, 27, 1, 0, 0));
            assert_eq!(engine.events().len(), 1);

            engine.draw(utc(2015, 5, 27, 3, 0, 0));
            assert!(engine.events().is_empty());
        }
    }
}
