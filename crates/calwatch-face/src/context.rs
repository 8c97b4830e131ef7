//! Per-frame render state.
//!
//! Everything a drawing step needs is in [`RenderContext`]; steps take it by
//! reference and append to a [`Frame`](crate::Frame). Nothing is carried
//! from one frame to the next.

use calwatch_core::{CalendarEvent, Color, NextEventPhase, Point};
use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::primitives::{Paint, PaintStyle, StrokeCap};

/// Language of the face's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Short weekday name shown in the date box.
    pub fn weekday_label(self, weekday: Weekday) -> &'static str {
        match self {
            Self::En => match weekday {
                Weekday::Mon => "Mon",
                Weekday::Tue => "Tue",
                Weekday::Wed => "Wed",
                Weekday::Thu => "Thu",
                Weekday::Fri => "Fri",
                Weekday::Sat => "Sat",
                Weekday::Sun => "Sun",
            },
            Self::Ja => match weekday {
                Weekday::Mon => "月",
                Weekday::Tue => "火",
                Weekday::Wed => "水",
                Weekday::Thu => "木",
                Weekday::Fri => "金",
                Weekday::Sat => "土",
                Weekday::Sun => "日",
            },
        }
    }

    /// Caption shown next to the countdown.
    pub fn next_event_message(self, title: &str, phase: NextEventPhase) -> String {
        match (self, phase) {
            (Self::En, NextEventPhase::Upcoming) => format!("until {title}"),
            (Self::En, NextEventPhase::Ongoing) => format!("until {title} ends"),
            (Self::Ja, NextEventPhase::Upcoming) => format!("{title}まで"),
            (Self::Ja, NextEventPhase::Ongoing) => format!("{title}終了まで"),
        }
    }

    /// Whether the caption goes above the countdown.
    pub fn message_first(self) -> bool {
        matches!(self, Self::Ja)
    }
}

/// Display state that changes how a frame is painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisplayMode {
    /// Low-power display: black background, gray ticks and hands, no
    /// second hand, only the dial and hands drawn.
    pub ambient: bool,
    /// The screen has fewer bits per color in ambient mode.
    pub low_bit_ambient: bool,
    /// Notifications are silenced; hands are dimmed.
    pub mute: bool,
}

impl DisplayMode {
    /// Anti-aliasing is off only in ambient mode on low-bit screens.
    pub fn anti_alias(&self) -> bool {
        !(self.ambient && self.low_bit_ambient)
    }
}

/// Battery charge as reported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatteryLevel {
    pub level: u32,
    /// Maximum level. Zero until the first report arrives.
    pub scale: u32,
}

impl BatteryLevel {
    pub fn new(level: u32, scale: u32) -> Self {
        Self { level, scale }
    }

    pub fn is_known(&self) -> bool {
        self.scale > 0
    }
}

/// Paints for the dial and hands, derived from the display mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePaints {
    pub background: Color,
    pub tick_small: Paint,
    pub tick_big: Paint,
    pub hour_hand: Paint,
    pub minute_hand: Paint,
    pub second_hand: Paint,
}

impl FacePaints {
    pub fn for_mode(mode: DisplayMode) -> Self {
        let (background, ink) = if mode.ambient {
            (Color::BLACK, Color::GRAY)
        } else {
            (Color::WHITE, Color::BLACK)
        };
        let aa = mode.anti_alias();
        let hand = |color: Color, width: f64, alpha: u8| {
            Paint::stroke(color, width)
                .with_cap(StrokeCap::Round)
                .with_anti_alias(aa)
                .with_alpha(if mode.mute { alpha } else { 255 })
        };

        Self {
            background,
            tick_small: Paint::stroke(ink.with_alpha(100), 2.0).with_anti_alias(aa),
            tick_big: Paint::stroke(ink.with_alpha(150), 8.0).with_anti_alias(aa),
            hour_hand: hand(ink, 12.0, 100),
            minute_hand: hand(ink, 6.0, 100),
            second_hand: hand(Color::RED, 3.0, 80),
        }
    }

    /// Paint for the round tip of the second hand.
    pub fn second_tip(&self) -> Paint {
        Paint::fill(self.second_hand.color)
            .with_style(PaintStyle::FillAndStroke)
            .with_anti_alias(self.second_hand.anti_alias)
    }
}

/// Everything one frame is drawn from.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub width: u32,
    pub height: u32,
    pub mode: DisplayMode,
    pub language: Language,
    /// The frame's instant on the wearer's clock.
    pub now: DateTime<Tz>,
    pub battery: BatteryLevel,
    /// Normalized events in painting order.
    pub events: &'a [CalendarEvent],
    pub paints: FacePaints,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        width: u32,
        height: u32,
        mode: DisplayMode,
        now: DateTime<Tz>,
        events: &'a [CalendarEvent],
    ) -> Self {
        Self {
            width,
            height,
            mode,
            language: Language::default(),
            now,
            battery: BatteryLevel::default(),
            events,
            paints: FacePaints::for_mode(mode),
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_battery(mut self, battery: BatteryLevel) -> Self {
        self.battery = battery;
        self
    }

    pub fn width_f(&self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f(&self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width_f() / 2.0, self.height_f() / 2.0)
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }

    pub fn weekday(&self) -> Weekday {
        self.now.weekday()
    }
}
