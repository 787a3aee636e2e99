//! Byte-count formatting

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// Compact binary-prefix form: one decimal and a single-letter suffix
///
/// # Examples
///
/// ```
/// use dirpulse::util::units::bytes_to_human;
///
/// assert_eq!(bytes_to_human(10000.0), "9.8K");
/// assert_eq!(bytes_to_human(100001221.0), "95.4M");
/// assert_eq!(bytes_to_human(512.0), "512B");
/// ```
pub fn bytes_to_human(n: f64) -> String {
    const SYMBOLS: [char; 8] = ['K', 'M', 'G', 'T', 'P', 'E', 'Z', 'Y'];

    for (i, symbol) in SYMBOLS.iter().enumerate().rev() {
        let prefix = 2f64.powi(10 * (i as i32 + 1));
        if n.abs() >= prefix {
            return format!("{:.1}{}", n / prefix, symbol);
        }
    }

    format!("{}B", n)
}

/// A bytes/sec rate as `B/s, KiB/s, MiB/s, GiB/s` figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBreakdown {
    pub bytes: f64,
    pub kib: f64,
    pub mib: f64,
    pub gib: f64,
}

impl RateBreakdown {
    pub fn new(bytes_per_sec: f64) -> Self {
        Self {
            bytes: bytes_per_sec,
            kib: bytes_per_sec / KIB,
            mib: bytes_per_sec / MIB,
            gib: bytes_per_sec / GIB,
        }
    }
}

impl std::fmt::Display for RateBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:.6}, {:.6}KiB/sec {:.6}MiB/sec {:.6}GiB/sec",
            self.bytes, self.kib, self.mib, self.gib
        )
    }
}
