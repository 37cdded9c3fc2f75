//! Countdown derivation for deal start/end timestamps.

use chrono::{DateTime, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 86_400_000;

/// Time remaining until a target timestamp, decomposed into display units.
///
/// A target in the past clamps every unit to zero; an all-zero countdown is
/// how "expired" reads, there is no separate signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    /// All units at zero.
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Compute the countdown from `now` to `target`.
    #[must_use]
    pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let diff = target.signed_duration_since(now).num_milliseconds();
        if diff <= 0 {
            return Self::ZERO;
        }

        Self {
            days: diff / MILLIS_PER_DAY,
            hours: (diff / MILLIS_PER_HOUR) % 24,
            minutes: (diff / MILLIS_PER_MINUTE) % 60,
            seconds: (diff / MILLIS_PER_SECOND) % 60,
        }
    }

    /// Whether every unit has reached zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_hour_one_minute_one_second() {
        let now = base_time();
        let target = now + Duration::seconds(3661);
        let countdown = Countdown::remaining(target, now);
        assert_eq!(
            countdown,
            Countdown {
                days: 0,
                hours: 1,
                minutes: 1,
                seconds: 1,
            }
        );
    }

    #[test]
    fn test_past_target_clamps_to_zero() {
        let now = base_time();
        let target = now - Duration::hours(3);
        let countdown = Countdown::remaining(target, now);
        assert_eq!(countdown, Countdown::ZERO);
        assert!(countdown.is_zero());
    }

    #[test]
    fn test_exact_target_is_zero() {
        let now = base_time();
        assert_eq!(Countdown::remaining(now, now), Countdown::ZERO);
    }

    #[test]
    fn test_multi_day_target() {
        let now = base_time();
        let target = now + Duration::days(2) + Duration::hours(5) + Duration::minutes(30);
        let countdown = Countdown::remaining(target, now);
        assert_eq!(countdown.days, 2);
        assert_eq!(countdown.hours, 5);
        assert_eq!(countdown.minutes, 30);
        assert_eq!(countdown.seconds, 0);
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let now = base_time();
        let target = now + Duration::milliseconds(1_500);
        let countdown = Countdown::remaining(target, now);
        assert_eq!(countdown.seconds, 1);
        assert!(!countdown.is_zero());
    }
}
