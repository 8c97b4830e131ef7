//! Redraw cadence.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Interactive redraw period.
pub const INTERACTIVE_UPDATE: Duration = Duration::from_secs(1);

/// Ambient redraw period.
pub const AMBIENT_UPDATE: Duration = Duration::from_secs(60);

/// Which clock drives redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// The face's own timer, every `period`.
    Interactive,
    /// The system's once-a-minute tick.
    Ambient,
    /// Hidden. Nothing is drawn.
    Stopped,
}

/// Time from `now` to the next multiple of `period` since the epoch.
///
/// Lands exactly on a boundary when `now` is already on one, so a timer
/// firing late never stacks up ticks. A zero period returns zero.
pub fn aligned_delay(now: DateTime<Utc>, period: Duration) -> Duration {
    let period_ms = period.as_millis();
    if period_ms == 0 {
        return Duration::ZERO;
    }
    let now_ms = i128::from(now.timestamp_millis());
    let offset = now_ms.rem_euclid(period_ms as i128) as u128;
    Duration::from_millis((period_ms - offset) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc_ms(h: u32, min: u32, s: u32, ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 5, 27, h, min, s).unwrap() + chrono::TimeDelta::milliseconds(ms)
    }

    #[test]
    fn interactive_aligns_to_second() {
        assert_eq!(
            aligned_delay(utc_ms(1, 8, 36, 250), INTERACTIVE_UPDATE),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn on_boundary_waits_full_period() {
        assert_eq!(aligned_delay(utc_ms(1, 8, 36, 0), INTERACTIVE_UPDATE), INTERACTIVE_UPDATE);
    }

    #[test]
    fn ambient_aligns_to_minute() {
        assert_eq!(
            aligned_delay(utc_ms(1, 8, 36, 500), AMBIENT_UPDATE),
            Duration::from_millis(23_500)
        );
    }

    #[test]
    fn zero_period() {
        assert_eq!(aligned_delay(utc_ms(1, 0, 0, 0), Duration::ZERO), Duration::ZERO);
    }
}
