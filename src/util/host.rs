//! Host introspection for the setup banner
//!
//! Collects the facts printed before a run so that results from different
//! machines can be told apart in interleaved multi-rank logs.

use std::path::PathBuf;

/// Description of the machine and process running the workload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    /// `<os> <arch>` of the running binary
    pub os: String,
    pub cpu_count: usize,
    /// CPUs the process may run on; None if unknown on this platform
    pub cpu_affinity: Option<Vec<usize>>,
    pub working_dir: PathBuf,
}

impl HostInfo {
    /// Gather host information; fields that cannot be read get placeholders
    pub fn collect() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            hostname,
            os: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            cpu_count: num_cpus::get(),
            cpu_affinity: cpu_affinity(),
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// CPUs the current process is allowed to run on
#[cfg(target_os = "linux")]
pub fn cpu_affinity() -> Option<Vec<usize>> {
    use libc::{cpu_set_t, sched_getaffinity, CPU_ISSET, CPU_SETSIZE};
    use std::mem;

    // SAFETY: cpu_set is a zeroed, correctly sized cpu_set_t owned by this frame
    unsafe {
        let mut cpu_set: cpu_set_t = mem::zeroed();
        if sched_getaffinity(0, mem::size_of::<cpu_set_t>(), &mut cpu_set) != 0 {
            return None;
        }

        Some((0..CPU_SETSIZE as usize).filter(|&cpu| CPU_ISSET(cpu, &cpu_set)).collect())
    }
}

#[cfg(not(target_os = "linux"))]
pub fn cpu_affinity() -> Option<Vec<usize>> {
    None
}

/// Format a CPU list compactly, collapsing runs into ranges
///
/// # Examples
///
/// ```
/// use dirpulse::util::host::format_cpu_list;
///
/// assert_eq!(format_cpu_list(&[0, 1, 2, 3, 6, 8, 9]), "0-3,6,8-9");
/// ```
pub fn format_cpu_list(cpus: &[usize]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut iter = cpus.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }

        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }

    parts.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect() {
        let info = HostInfo::collect();
        assert!(!info.hostname.is_empty());
        assert!(info.cpu_count >= 1);
        assert!(info.os.contains(std::env::consts::OS));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_cpu_affinity_linux() {
        let cpus = cpu_affinity().unwrap();
        assert!(!cpus.is_empty());
    }

    #[test]
    fn test_format_cpu_list() {
        assert_eq!(format_cpu_list(&[]), "");
        assert_eq!(format_cpu_list(&[5]), "5");
        assert_eq!(format_cpu_list(&[0, 1]), "0-1");
        assert_eq!(format_cpu_list(&[0, 2, 4]), "0,2,4");
        assert_eq!(format_cpu_list(&[0, 1, 2, 3, 6, 8, 9]), "0-3,6,8-9");
    }
}
