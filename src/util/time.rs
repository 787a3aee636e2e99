//! Monotonic timing for the write loop
//!
//! Write latency is measured with a monotonic clock; wall-clock time is
//! only used for the start/end stamps in the report.

use std::time::{Duration, Instant};

/// Monotonic clock reading taken around a timed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    /// Time passed since this reading
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    /// Time between an earlier reading and this one, zero if `earlier` is later
    #[inline]
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        self.instant.saturating_duration_since(earlier.instant)
    }

    /// [`duration_since`](Self::duration_since) as fractional seconds, the unit
    /// the statistics are kept in
    #[inline]
    pub fn secs_since(&self, earlier: Timestamp) -> f64 {
        self.duration_since(earlier).as_secs_f64()
    }
}

/// Short form for DEBUG lines: `500ns`, `1.50us`, `2.50ms`, `5.00s`
///
/// ```
/// use std::time::Duration;
/// use dirpulse::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    match nanos {
        0..=999 => format!("{}ns", nanos),
        1_000..=999_999 => format!("{:.2}us", nanos as f64 / 1e3),
        1_000_000..=999_999_999 => format!("{:.2}ms", nanos as f64 / 1e6),
        _ => format!("{:.2}s", duration.as_secs_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_secs_since_covers_sleep() {
        let t0 = Timestamp::now();
        thread::sleep(Duration::from_millis(5));
        let t1 = Timestamp::now();

        assert!(t1 >= t0);
        assert!(t1.duration_since(t0) >= Duration::from_millis(5));
        assert!(t1.secs_since(t0) >= 0.005);
        assert!(t0.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_reversed_order_saturates() {
        let t0 = Timestamp::now();
        thread::sleep(Duration::from_millis(1));
        let t1 = Timestamp::now();

        assert_eq!(t0.duration_since(t1), Duration::ZERO);
        assert_eq!(t0.secs_since(t1), 0.0);
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(Duration::ZERO), "0ns");
        assert_eq!(format_duration(Duration::from_nanos(999)), "999ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "90.00s");
    }
}
