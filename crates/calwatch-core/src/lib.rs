//! Core types for the calendar watch face: events, durations, recurrence,
//! window clipping, painting order, dial geometry, countdown.

pub mod clip;
pub mod countdown;
pub mod dial;
pub mod duration;
pub mod error;
pub mod event;
pub mod normalize;
pub mod order;
pub mod recurrence;
pub mod time;
pub mod tracing;

pub use clip::clip_to_window;
pub use countdown::{NextEvent, NextEventPhase, format_countdown, next_event};
pub use dial::{ArcSpan, Point, TOP_ANGLE, dial_angle, polar_point};
pub use duration::{DurationError, parse_duration, parse_duration_millis};
pub use error::NormalizeError;
pub use event::{CalendarEvent, Color};
pub use normalize::{normalize_event, normalize_events};
pub use order::{compare_for_painting, painting_order, sort_for_painting};
pub use recurrence::resolve_recurrence;
pub use time::{AnchorHour, InstanceWindow, VISIBLE_HOURS, floor_to_hour};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
