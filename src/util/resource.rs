//! Process CPU time
//!
//! Reports how much CPU the process burned during the write phase and
//! inside the timed write regions. Reads `CLOCK_PROCESS_CPUTIME_ID`, which
//! has nanosecond resolution on Linux, unlike the tick counts in
//! /proc/self/stat.

use std::time::Duration;

/// Process CPU time consumed so far (user + system)
///
/// Returns None if the clock is unavailable on this platform.
#[cfg(unix)]
pub fn process_cpu_time() -> Option<Duration> {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };

    // SAFETY: ts is a valid, writable timespec for the duration of the call
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_PROCESS_CPUTIME_ID, &mut ts) };
    if rc != 0 || ts.tv_sec < 0 || ts.tv_nsec < 0 {
        return None;
    }

    Some(Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32))
}

#[cfg(not(unix))]
pub fn process_cpu_time() -> Option<Duration> {
    None
}

/// Process CPU clock reading
#[derive(Debug, Clone, Copy)]
pub struct CpuStamp {
    cpu: Option<Duration>,
}

impl CpuStamp {
    /// Read the process CPU clock
    #[inline]
    pub fn now() -> Self {
        Self {
            cpu: process_cpu_time(),
        }
    }

    /// CPU time consumed since an earlier reading
    #[inline]
    pub fn since(&self, earlier: CpuStamp) -> Option<Duration> {
        Some(self.cpu?.saturating_sub(earlier.cpu?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_process_cpu_time_available() {
        assert!(process_cpu_time().is_some());
    }

    #[test]
    fn test_cpu_stamp_monotonic() {
        let start = CpuStamp::now();

        // Do some CPU work
        let mut sum = 0u64;
        for i in 0..1_000_000u64 {
            sum = sum.wrapping_add(std::hint::black_box(i) * i);
        }
        assert!(sum > 0);

        let end = CpuStamp::now();
        #[cfg(target_os = "linux")]
        assert!(end.since(start).unwrap() > Duration::ZERO);
        #[cfg(not(target_os = "linux"))]
        let _ = end.since(start);
    }

    #[test]
    fn test_cpu_stamp_missing_clock() {
        let missing = CpuStamp { cpu: None };
        let present = CpuStamp {
            cpu: Some(Duration::from_secs(1)),
        };
        assert_eq!(present.since(missing), None);
        assert_eq!(missing.since(present), None);
        assert_eq!(present.since(present), Some(Duration::ZERO));
    }
}
