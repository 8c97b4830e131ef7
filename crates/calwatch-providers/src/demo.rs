//! Built-in demo calendar.
//!
//! Three events on 2015-05-27 in Tokyo, with the clock frozen at
//! 10:08:36 and the battery at 29%. Used by `--demo` to show a populated
//! face without any calendar data.

use calwatch_core::{Color, InstanceWindow};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::{Asia::Tokyo, Tz};

use crate::error::{ProviderError, ProviderResult};
use crate::row::EventRow;
use crate::source::EventSource;

/// Time zone of the demo calendar.
pub const DEMO_TIMEZONE: Tz = Tokyo;

/// Battery level shown in demo mode, out of 100.
pub const DEMO_BATTERY_LEVEL: u32 = 29;

const WORK: Color = Color::argb(0xff, 0x42, 0xd6, 0x92);
const PRIVATE: Color = Color::argb(0xff, 0x9f, 0xc6, 0xe7);

/// The instant the demo face is frozen at.
pub fn demo_now() -> ProviderResult<DateTime<Utc>> {
    tokyo(10, 8, 36)
}

fn tokyo(hour: u32, minute: u32, second: u32) -> ProviderResult<DateTime<Utc>> {
    DEMO_TIMEZONE
        .with_ymd_and_hms(2015, 5, 27, hour, minute, second)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ProviderError::internal("demo instant does not exist"))
}

/// The demo events, ignoring any window.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl DemoSource {
    pub fn rows() -> ProviderResult<Vec<EventRow>> {
        let event = |title: &str, start: u32, end: u32, color: Color| -> ProviderResult<EventRow> {
            Ok(EventRow::timed(title, tokyo(start, 0, 0)?, tokyo(end, 0, 0)?)
                .with_timezone(DEMO_TIMEZONE.name())
                .with_calendar(1, color))
        };
        Ok(vec![
            event("打ち合わせ", 11, 12, WORK)?,
            event("A社へ訪問", 13, 16, WORK)?,
            event("Bさんと食事", 19, 21, PRIVATE)?,
        ])
    }
}

impl EventSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn query_instances(&self, _window: &InstanceWindow) -> ProviderResult<Vec<EventRow>> {
        Self::rows().map_err(|e| e.with_provider(self.name()))
    }
}
