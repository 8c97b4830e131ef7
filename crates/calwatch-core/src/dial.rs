//! Geometry of the twelve-hour dial.
//!
//! Two conventions are used, matching the two kinds of drawing calls:
//! - arc angles are in degrees, measured clockwise from 3 o'clock, so 12
//!   o'clock is [`TOP_ANGLE`] (−90°)
//! - rotations are in radians, measured clockwise from 12 o'clock, and are
//!   turned into points with [`polar_point`]

use std::f64::consts::PI;

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Arc angle of 12 o'clock.
pub const TOP_ANGLE: f64 = -90.0;

/// Number of tick marks around the dial.
pub const TICK_COUNT: u32 = 60;

/// Maps a time of day to its arc angle on the twelve-hour dial.
///
/// `hour` may exceed 23 for spans that run into following days; the angle
/// keeps growing instead of wrapping.
pub fn dial_angle(hour: u32, minute: u32) -> f64 {
    TOP_ANGLE + fractional_hours(hour, minute) / 12.0 * 360.0
}

/// Rotation of the hour hand, in radians from 12 o'clock.
pub fn hour_rotation(hour: u32, minute: u32) -> f64 {
    fractional_hours(hour, minute) / 6.0 * PI
}

/// Rotation of the minute hand.
pub fn minute_rotation(minute: u32) -> f64 {
    f64::from(minute) / 30.0 * PI
}

/// Rotation of the second hand.
pub fn second_rotation(second: u32) -> f64 {
    f64::from(second) / 30.0 * PI
}

/// Rotation of the tick mark at `index` (0 is 12 o'clock).
pub fn tick_rotation(index: u32) -> f64 {
    f64::from(index) * PI * 2.0 / f64::from(TICK_COUNT)
}

/// Returns true for the tick marks that sit on an hour.
pub fn is_hour_tick(index: u32) -> bool {
    index % 5 == 0
}

/// Arc sweep for the battery ring, in degrees.
///
/// Returns 0 when the scale is unknown; levels above the scale are capped
/// at a full circle.
pub fn battery_sweep(level: u32, scale: u32) -> f64 {
    if scale == 0 {
        return 0.0;
    }
    f64::from(level.min(scale)) / f64::from(scale) * 360.0
}

/// Rotation of the battery ring's tip.
pub fn battery_tip_rotation(level: u32, scale: u32) -> f64 {
    battery_sweep(level, scale).to_radians()
}

fn fractional_hours(hour: u32, minute: u32) -> f64 {
    f64::from(hour) + f64::from(minute) / 60.0
}

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Returns the point `radius` away from `center` at `rotation`.
///
/// The y axis points down, so 12 o'clock is `center.y - radius`.
pub fn polar_point(center: Point, radius: f64, rotation: f64) -> Point {
    Point {
        x: center.x + rotation.sin() * radius,
        y: center.y - rotation.cos() * radius,
    }
}

/// The arc an event occupies on the dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpan {
    /// Arc angle of the start, in degrees.
    pub start_angle: f64,
    /// Arc angle of the end, in degrees. Never wraps below `start_angle`
    /// for spans that cross midnight.
    pub end_angle: f64,
}

impl ArcSpan {
    /// Computes the arc between two local instants.
    ///
    /// When the end falls on a later calendar date, 24 hours per day of
    /// difference are added to its hour. An end before the start collapses
    /// the arc onto its start edge.
    pub fn between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self {
        let start_angle = dial_angle(start.hour(), start.minute());
        let days = (end.date_naive() - start.date_naive()).num_days();
        let end_hour = i64::from(end.hour()) + 24 * days;
        let end_angle = match u32::try_from(end_hour) {
            Ok(hour) if end >= start => dial_angle(hour, end.minute()),
            _ => {
                trace!(start_angle, end_hour, "end before start, arc clipped to start edge");
                start_angle
            }
        };
        Self { start_angle, end_angle }
    }

    /// Sweep of the arc in degrees.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Rotation of the start edge, in radians from 12 o'clock.
    pub fn start_rotation(&self) -> f64 {
        (self.start_angle - TOP_ANGLE).to_radians()
    }

    /// Rotation of the end edge, in radians from 12 o'clock.
    pub fn end_rotation(&self) -> f64 {
        (self.end_angle - TOP_ANGLE).to_radians()
    }
}
