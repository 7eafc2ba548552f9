//! Time keeping module for the watch face

use chrono::{DateTime, FixedOffset, Utc};
use embassy_time::Instant;

use crate::error::{FaceError, Result};

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait TimeSource {
    fn now_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Wall-clock time anchored to a point on the uptime timer.
#[derive(Debug, Clone, Copy)]
pub struct TimeReference {
    /// Clock time in epoch milliseconds
    epoch_millis: i64,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Anchor `epoch_millis` to the current uptime.
    pub fn from_epoch_millis(epoch_millis: i64) -> Self {
        Self {
            epoch_millis,
            instant: Instant::now(),
        }
    }

    /// Anchor `epoch_millis` to an explicit uptime instant.
    pub fn at(epoch_millis: i64, instant: Instant) -> Self {
        Self {
            epoch_millis,
            instant,
        }
    }
}

impl TimeSource for TimeReference {
    fn now_millis(&self) -> i64 {
        let elapsed = Instant::now().saturating_duration_since(self.instant);
        self.epoch_millis + elapsed.as_millis() as i64
    }
}

/// Wall clock plus the active time zone.
pub struct Clock<S> {
    source: S,
    timezone: FixedOffset,
}

impl<S: TimeSource> Clock<S> {
    pub fn new(source: S, timezone: FixedOffset) -> Self {
        Self { source, timezone }
    }

    /// Fresh snapshot of the current time. Never cached.
    pub fn now(&self) -> ClockReading {
        ClockReading {
            epoch_millis: self.source.now_millis(),
            timezone: self.timezone,
        }
    }

    /// Switch the zone used for subsequent readings.
    pub fn on_timezone_changed(&mut self, timezone: FixedOffset) {
        self.timezone = timezone;
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the time source, e.g. after a time sync.
    pub fn set_source(&mut self, source: S) {
        self.source = source;
    }
}

/// Immutable time snapshot taken for a single draw or scheduling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub epoch_millis: i64,
    pub timezone: FixedOffset,
}

impl ClockReading {
    /// Local date and time in the reading's zone.
    pub fn local(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::<Utc>::from_timestamp_millis(self.epoch_millis)
            .map(|utc| utc.with_timezone(&self.timezone))
            .ok_or(FaceError::InvalidTimestamp(self.epoch_millis))
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use chrono::{Datelike, Timelike};

    use super::*;

    struct Fixed(Cell<i64>);

    impl TimeSource for Fixed {
        fn now_millis(&self) -> i64 {
            self.0.get()
        }
    }

    #[test]
    fn reading_follows_source_and_zone() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let mut clock = Clock::new(Fixed(Cell::new(1_709_424_000_000)), utc);
        let first = clock.now();
        assert_eq!(first.local().unwrap().hour(), 0);

        clock.source().0.set(1_709_424_000_000 + 90 * 60 * 1000);
        clock.on_timezone_changed(FixedOffset::east_opt(2 * 3600).unwrap());
        let second = clock.now();
        let local = second.local().unwrap();
        assert_eq!((local.hour(), local.minute()), (3, 30));
        assert_eq!(local.day(), 3);
        // Earlier snapshots are not affected.
        assert_eq!(first.timezone, utc);
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let reading = ClockReading {
            epoch_millis: i64::MAX,
            timezone: FixedOffset::east_opt(0).unwrap(),
        };
        assert_eq!(reading.local(), Err(FaceError::InvalidTimestamp(i64::MAX)));
    }

    #[test]
    fn time_reference_advances_from_anchor() {
        let reference = TimeReference::from_epoch_millis(5_000);
        assert!(reference.now_millis() >= 5_000);
    }
}
