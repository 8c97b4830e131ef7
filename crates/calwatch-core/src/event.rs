//! Calendar event types.
//!
//! - [`CalendarEvent`]: one calendar instance inside the lookahead window
//! - [`Color`]: a packed ARGB color as delivered by the calendar provider

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A packed 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const GRAY: Self = Self(0xFF88_8888);
    pub const LIGHT_GRAY: Self = Self(0xFFCC_CCCC);
    pub const DARK_GRAY: Self = Self(0xFF44_4444);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const BLUE: Self = Self(0xFF00_00FF);
    pub const TRANSPARENT: Self = Self(0);

    /// Creates a color from its four channels.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Reinterprets a signed provider color value.
    ///
    /// Calendar providers commonly hand colors out as signed 32-bit ints,
    /// which makes every opaque color negative.
    pub const fn from_signed(value: i32) -> Self {
        Self(value as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns the same color with a different alpha channel.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self::argb(alpha, self.red(), self.green(), self.blue())
    }
}

/// A calendar instance in the lookahead window.
///
/// Start and end are optional because the provider may leave them null:
/// instances of a recurring series carry their first occurrence in `start`
/// and no `end`, with the real span encoded in `rrule` and `duration`.
/// After normalization a drawable event has both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The event title.
    pub title: String,
    /// When the event starts.
    pub start: Option<DateTime<Utc>>,
    /// When the event ends.
    pub end: Option<DateTime<Utc>>,
    /// Whether this is an all-day event.
    pub all_day: bool,
    /// IANA time zone the event was created in.
    pub timezone: Option<String>,
    /// The event location.
    pub location: Option<String>,
    /// Identifier of the calendar the event belongs to.
    pub calendar_id: i64,
    /// Display color of the source calendar.
    pub calendar_color: Color,
    /// The event description.
    pub description: Option<String>,
    /// Repetition rule (RFC 5545 RRULE).
    pub rrule: Option<String>,
    /// Repetition date list (RFC 5545 RDATE).
    pub rdate: Option<String>,
    /// Length of each occurrence, e.g. `P3600S`.
    pub duration: Option<String>,
}

impl CalendarEvent {
    /// Creates a timed event with the given span.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start: Some(start),
            end: Some(end),
            all_day: false,
            timezone: None,
            location: None,
            calendar_id: 0,
            calendar_color: Color::default(),
            description: None,
            rrule: None,
            rdate: None,
            duration: None,
        }
    }

    /// Creates an event with no times set.
    pub fn untimed(title: impl Into<String>) -> Self {
        Self {
            start: None,
            end: None,
            ..Self::new(title, DateTime::UNIX_EPOCH, DateTime::UNIX_EPOCH)
        }
    }

    /// Returns true if the event carries a non-empty repetition rule.
    pub fn is_recurring(&self) -> bool {
        self.rrule.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    /// Returns the start and end when both are known.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start?, self.end?))
    }

    /// Returns true if the event gets an arc on the dial.
    ///
    /// All-day events and events without a complete span are kept in the
    /// list but never drawn.
    pub fn is_drawable(&self) -> bool {
        !self.all_day && self.span().is_some()
    }

    /// Checks if the event is ongoing at the given time.
    pub fn is_ongoing_at(&self, now: DateTime<Utc>) -> bool {
        self.span()
            .is_some_and(|(start, end)| start <= now && now < end)
    }

    /// Returns the length of the event, if its span is known.
    pub fn length(&self) -> Option<TimeDelta> {
        self.span().map(|(start, end)| end - start)
    }

    /// Builder method to set the all-day flag.
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Builder method to set the event time zone.
    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the source calendar.
    pub fn with_calendar(mut self, id: i64, color: Color) -> Self {
        self.calendar_id = id;
        self.calendar_color = color;
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the repetition rule and occurrence length.
    pub fn with_recurrence(mut self, rrule: impl Into<String>, duration: impl Into<String>) -> Self {
        self.rrule = Some(rrule.into());
        self.duration = Some(duration.into());
        self
    }

    /// Builder method to set the repetition date list.
    pub fn with_rdate(mut self, rdate: impl Into<String>) -> Self {
        self.rdate = Some(rdate.into());
        self
    }

    /// Builder method to clear the end time.
    pub fn without_end(mut self) -> Self {
        self.end = None;
        self
    }
}
