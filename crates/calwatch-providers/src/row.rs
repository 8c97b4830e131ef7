//! Calendar instance rows as the provider hands them out.
//!
//! Every column is nullable and instants are epoch milliseconds. Rows are
//! deserializable so fixtures and exported calendars can be loaded from
//! JSON.

use calwatch_core::{CalendarEvent, Color, InstanceWindow, parse_duration};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One row of an instance query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRow {
    pub title: Option<String>,
    /// Start in epoch milliseconds. For a recurring series, the first
    /// occurrence.
    pub dtstart: Option<i64>,
    /// End in epoch milliseconds. Null for recurring series.
    pub dtend: Option<i64>,
    /// `1` for all-day events.
    pub all_day: i32,
    pub event_timezone: Option<String>,
    pub event_location: Option<String>,
    pub calendar_id: i64,
    /// Signed packed ARGB, as stored by the provider.
    pub calendar_color: i32,
    pub description: Option<String>,
    pub rrule: Option<String>,
    pub rdate: Option<String>,
    pub duration: Option<String>,
}

impl EventRow {
    /// Creates a timed row from two instants.
    pub fn timed(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: Some(title.into()),
            dtstart: Some(start.timestamp_millis()),
            dtend: Some(end.timestamp_millis()),
            ..Self::default()
        }
    }

    pub fn is_all_day(&self) -> bool {
        self.all_day == 1
    }

    pub fn is_recurring(&self) -> bool {
        self.rrule.as_deref().is_some_and(|r| !r.trim().is_empty())
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.dtstart.and_then(DateTime::from_timestamp_millis)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.dtend.and_then(DateTime::from_timestamp_millis)
    }

    /// Whether an instance query for `window` would return this row.
    ///
    /// A plain row must overlap the window. A recurring row is placed on the
    /// date the window starts, in the event's own zone (UTC when unknown),
    /// and that occurrence must overlap. Rows whose duration cannot be read
    /// are kept so normalization can report them.
    pub fn occurs_in(&self, window: &InstanceWindow) -> bool {
        let Some(start) = self.start() else {
            return false;
        };
        if !self.is_recurring() {
            return window.overlaps(start, self.end());
        }

        let Some(length) = self.duration.as_deref().and_then(|d| parse_duration(d).ok()) else {
            return true;
        };
        let tz = self
            .event_timezone
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(Tz::UTC);
        let day = window.start.with_timezone(&tz).date_naive();
        let time = start.with_timezone(&tz).time();
        tz.from_local_datetime(&day.and_time(time))
            .earliest()
            .map(|occurrence| occurrence.with_timezone(&Utc))
            .is_some_and(|occurrence| window.overlaps(occurrence, occurrence.checked_add_signed(length)))
    }

    /// Converts the row into a calendar event.
    ///
    /// Out-of-range timestamps become missing instants; a missing title
    /// becomes empty.
    pub fn into_event(self) -> CalendarEvent {
        let (start, end, all_day) = (self.start(), self.end(), self.is_all_day());
        CalendarEvent {
            start,
            end,
            title: self.title.unwrap_or_default(),
            all_day,
            timezone: self.event_timezone,
            location: self.event_location,
            calendar_id: self.calendar_id,
            calendar_color: Color::from_signed(self.calendar_color),
            description: self.description,
            rrule: self.rrule,
            rdate: self.rdate,
            duration: self.duration,
        }
    }

    pub fn with_all_day(mut self) -> Self {
        self.all_day = 1;
        self
    }

    pub fn with_timezone(mut self, tz: impl Into<String>) -> Self {
        self.event_timezone = Some(tz.into());
        self
    }

    pub fn with_calendar(mut self, id: i64, color: Color) -> Self {
        self.calendar_id = id;
        self.calendar_color = color.0 as i32;
        self
    }

    /// Marks the row as a recurring series: the end is cleared and the
    /// occurrence length is carried in `duration`.
    pub fn with_recurrence(mut self, rrule: impl Into<String>, duration: impl Into<String>) -> Self {
        self.rrule = Some(rrule.into());
        self.duration = Some(duration.into());
        self.dtend = None;
        self
    }
}
