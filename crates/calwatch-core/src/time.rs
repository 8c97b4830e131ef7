//! Time types for the watch face.
//!
//! This module provides [`AnchorHour`], the current time floored to the top
//! of the hour in the wearer's time zone, and [`InstanceWindow`], the
//! half-open range used to query calendar instances.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Number of hours visible on the dial.
pub const VISIBLE_HOURS: i64 = 12;

/// Floors an instant to the top of its hour in the given time zone.
///
/// The floor is taken on the local wall clock, so zones with half-hour
/// offsets still floor to their own `HH:00`.
pub fn floor_to_hour<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = instant.with_timezone(tz);
    let past_hour = TimeDelta::seconds(i64::from(local.minute() * 60 + local.second()))
        + TimeDelta::nanoseconds(i64::from(local.nanosecond()));
    instant - past_hour
}

/// The current time floored to the hour, in a specific time zone.
///
/// Every clipping decision is made relative to the anchor: events that
/// started before it are pulled forward to it, events that end twelve or
/// more hours after it are pulled back to [`AnchorHour::horizon`].
#[derive(Debug, Clone)]
pub struct AnchorHour<Tz: TimeZone> {
    at: DateTime<Tz>,
}

impl<Tz: TimeZone> AnchorHour<Tz> {
    /// Creates the anchor for `now` in `tz`.
    pub fn floor(now: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            at: floor_to_hour(now, tz).with_timezone(tz),
        }
    }

    /// Returns the anchor as a UTC instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }

    /// Returns the anchor on the local wall clock.
    pub fn local(&self) -> &DateTime<Tz> {
        &self.at
    }

    /// Returns the time zone the anchor was computed in.
    pub fn timezone(&self) -> Tz {
        self.at.timezone()
    }

    /// Returns the local calendar date of the anchor.
    pub fn date(&self) -> NaiveDate {
        self.at.date_naive()
    }

    /// Returns the local hour of day of the anchor (0-23).
    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    /// Returns the given wall-clock time on the anchor's date.
    ///
    /// Returns `None` when that local time does not exist (it falls in a
    /// daylight-saving gap). Ambiguous times resolve to the earlier instant.
    pub fn on_anchor_date(&self, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.timezone()
            .from_local_datetime(&self.date().and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Returns the end of the visible dial: anchor hour + 12 on the anchor's
    /// date, on the local wall clock.
    ///
    /// Falls back to twelve elapsed hours when the wall-clock time does not
    /// exist in the zone.
    pub fn horizon(&self) -> DateTime<Utc> {
        let wall = self.at.naive_local() + TimeDelta::hours(VISIBLE_HOURS);
        self.timezone()
            .from_local_datetime(&wall)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| self.instant() + TimeDelta::hours(VISIBLE_HOURS))
    }

    /// Returns whole hours from the anchor to `instant`, truncated toward zero.
    pub fn hours_until(&self, instant: DateTime<Utc>) -> i64 {
        (instant - self.instant()).num_hours()
    }
}

/// The instance window used to query the calendar provider.
///
/// Represents a half-open interval `[start, end)` in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl InstanceWindow {
    /// Creates a new window.
    ///
    /// # Panics
    ///
    /// Panics if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        assert!(start <= end, "InstanceWindow start must be <= end");
        Self { start, end }
    }

    /// Creates the fixed twelve-hour lookahead window starting at `now`.
    pub fn lookahead(now: DateTime<Utc>) -> Self {
        Self::new(now, now + TimeDelta::hours(VISIBLE_HOURS))
    }

    /// Returns the duration of this window.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Checks if an instant falls within this window.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if a span overlaps this window.
    ///
    /// A span without an end is treated as an instant at its start.
    pub fn overlaps(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> bool {
        match end {
            Some(end) => start < self.end && end > self.start,
            None => self.contains(start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    mod anchor_hour {
        use super::*;

        #[test]
        fn floors_to_top_of_hour() {
            let anchor = AnchorHour::floor(utc(2015, 5, 27, 8, 42, 17), &Utc);
            assert_eq!(anchor.instant(), utc(2015, 5, 27, 8, 0, 0));
            assert_eq!(anchor.hour(), 8);
            assert_eq!(anchor.date(), NaiveDate::from_ymd_opt(2015, 5, 27).unwrap());
        }

        #[test]
        fn already_aligned_is_unchanged() {
            let now = utc(2015, 5, 27, 8, 0, 0);
            assert_eq!(AnchorHour::floor(now, &Utc).instant(), now);
        }

        #[test]
        fn floors_on_local_clock() {
            // Asia/Kolkata is UTC+05:30, so 03:10 UTC is 08:40 local.
            let tz = chrono_tz::Asia::Kolkata;
            let anchor = AnchorHour::floor(utc(2015, 5, 27, 3, 10, 0), &tz);
            assert_eq!(anchor.hour(), 8);
            assert_eq!(anchor.instant(), utc(2015, 5, 27, 2, 30, 0));
        }

        #[test]
        fn local_date_differs_from_utc_date() {
            let tz = chrono_tz::Asia::Tokyo;
            let anchor = AnchorHour::floor(utc(2015, 5, 26, 23, 30, 0), &tz);
            assert_eq!(anchor.date(), NaiveDate::from_ymd_opt(2015, 5, 27).unwrap());
            assert_eq!(anchor.hour(), 8);
        }

        #[test]
        fn horizon_is_twelve_hours_ahead() {
            let anchor = AnchorHour::floor(utc(2015, 5, 27, 8, 15, 0), &Utc);
            assert_eq!(anchor.horizon(), utc(2015, 5, 27, 20, 0, 0));
        }

        #[test]
        fn horizon_rolls_into_next_day() {
            let anchor = AnchorHour::floor(utc(2015, 5, 27, 19, 5, 0), &Utc);
            assert_eq!(anchor.horizon(), utc(2015, 5, 28, 7, 0, 0));
        }

        #[test]
        fn on_anchor_date_keeps_time_of_day() {
            let anchor = AnchorHour::floor(utc(2015, 5, 27, 8, 15, 0), &Utc);
            let time = NaiveTime::from_hms_opt(13, 45, 0).unwrap();
            assert_eq!(
                anchor.on_anchor_date(time),
                Some(utc(2015, 5, 27, 13, 45, 0))
            );
        }

        #[test]
        fn on_anchor_date_rejects_dst_gap() {
            // 2015-03-08 02:30 does not exist in America/New_York.
            let tz = chrono_tz::America::New_York;
            let anchor = AnchorHour::floor(utc(2015, 3, 8, 6, 0, 0), &tz);
            let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
            assert_eq!(anchor.on_anchor_date(time), None);
        }

        #[test]
        fn hours_until_truncates() {
            let anchor = AnchorHour::floor(utc(2015, 5, 27, 8, 0, 0), &Utc);
            assert_eq!(anchor.hours_until(utc(2015, 5, 27, 19, 59, 0)), 11);
            assert_eq!(anchor.hours_until(utc(2015, 5, 27, 20, 0, 0)), 12);
            assert_eq!(anchor.hours_until(utc(2015, 5, 27, 7, 30, 0)), 0);
            assert_eq!(anchor.hours_until(utc(2015, 5, 27, 7, 0, 0)), -1);
        }
    }

    mod instance_window {
        use super::*;

        #[test]
        fn lookahead_is_twelve_hours() {
            let now = utc(2015, 5, 27, 8, 42, 0);
            let window = InstanceWindow::lookahead(now);
            assert_eq!(window.start, now);
            assert_eq!(window.end, utc(2015, 5, 27, 20, 42, 0));
            assert_eq!(window.duration(), TimeDelta::hours(12));
        }

        #[test]
        #[should_panic(expected = "start must be <= end")]
        fn invalid_window() {
            InstanceWindow::new(utc(2015, 5, 27, 17, 0, 0), utc(2015, 5, 27, 9, 0, 0));
        }

        #[test]
        fn contains_is_half_open() {
            let window = InstanceWindow::new(utc(2015, 5, 27, 9, 0, 0), utc(2015, 5, 27, 17, 0, 0));
            assert!(window.contains(utc(2015, 5, 27, 9, 0, 0)));
            assert!(window.contains(utc(2015, 5, 27, 16, 59, 59)));
            assert!(!window.contains(utc(2015, 5, 27, 17, 0, 0)));
            assert!(!window.contains(utc(2015, 5, 27, 8, 59, 59)));
        }

        #[test]
        fn overlaps() {
            let window = InstanceWindow::new(utc(2015, 5, 27, 9, 0, 0), utc(2015, 5, 27, 17, 0, 0));

            // Started before, still running
            assert!(window.overlaps(utc(2015, 5, 27, 8, 0, 0), Some(utc(2015, 5, 27, 10, 0, 0))));

            // Ends exactly at window start
            assert!(!window.overlaps(utc(2015, 5, 27, 8, 0, 0), Some(utc(2015, 5, 27, 9, 0, 0))));

            // Starts at window end
            assert!(!window.overlaps(utc(2015, 5, 27, 17, 0, 0), Some(utc(2015, 5, 27, 18, 0, 0))));

            // Open-ended span
            assert!(window.overlaps(utc(2015, 5, 27, 12, 0, 0), None));
            assert!(!window.overlaps(utc(2015, 5, 27, 18, 0, 0), None));
        }

        #[test]
        fn serde_roundtrip() {
            let window = InstanceWindow::lookahead(utc(2015, 5, 27, 8, 0, 0));
            let json = serde_json::to_string(&window).unwrap();
            let parsed: InstanceWindow = serde_json::from_str(&json).unwrap();
            assert_eq!(window, parsed);
        }
    }
}
