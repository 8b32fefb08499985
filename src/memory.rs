use std::fs;

use crate::error::{Result, SampleError};

const MEMINFO_PATH: &str = "/proc/meminfo";

/// Memory accounting fields from /proc/meminfo, all in kilobytes.
///
/// `total` and `available` drive the used-percent computation; the rest are
/// carried for callers that want the raw accounting. `MemFree`, `Buffers`
/// and `Cached` default to zero when the kernel does not report them,
/// `MemTotal` and `MemAvailable` must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub total: u64,
    pub free: u64,
    pub available: u64,
    pub buffers: u64,
    pub cached: u64,
}

impl MemInfo {
    /// Percentage of memory in use, counting memory the kernel can reclaim
    /// as available rather than used.
    pub fn used_percent(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(SampleError::DegenerateSample {
                subject: MEMINFO_PATH.to_string(),
                detail: "MemTotal is zero".to_string(),
            });
        }
        let used = self.total.saturating_sub(self.available);
        Ok(100.0 * used as f64 / self.total as f64)
    }
}

/// Read one `MemInfo` snapshot from /proc/meminfo.
pub fn sample() -> Result<MemInfo> {
    let raw = fs::read_to_string(MEMINFO_PATH).map_err(|e| SampleError::SourceUnavailable {
        subject: MEMINFO_PATH.to_string(),
        source: e,
    })?;
    parse_meminfo(&raw)
}

pub fn usage_percent() -> Result<f64> {
    sample()?.used_percent()
}

// Lines look like "MemTotal:       16284536 kB"; anything else is skipped.
fn parse_meminfo(raw: &str) -> Result<MemInfo> {
    let mut total = None;
    let mut free = None;
    let mut available = None;
    let mut buffers = None;
    let mut cached = None;

    for line in raw.lines() {
        let slot = if line.starts_with("MemTotal:") {
            &mut total
        } else if line.starts_with("MemFree:") {
            &mut free
        } else if line.starts_with("MemAvailable:") {
            &mut available
        } else if line.starts_with("Buffers:") {
            &mut buffers
        } else if line.starts_with("Cached:") {
            &mut cached
        } else {
            continue;
        };
        *slot = Some(parse_kb_value(line)?);
    }

    let total = total.ok_or_else(|| malformed("MemTotal not found"))?;
    let available = available.ok_or_else(|| malformed("MemAvailable not found"))?;

    Ok(MemInfo {
        total,
        available,
        free: free.unwrap_or(0),
        buffers: buffers.unwrap_or(0),
        cached: cached.unwrap_or(0),
    })
}

fn parse_kb_value(line: &str) -> Result<u64> {
    line.split_whitespace()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| malformed(&format!("bad value in {:?}", line)))
}

fn malformed(detail: &str) -> SampleError {
    SampleError::MalformedData {
        subject: MEMINFO_PATH.to_string(),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "\
MemTotal:       16284536 kB
MemFree:         3741928 kB
MemAvailable:   10222108 kB
Buffers:          523056 kB
Cached:          5612340 kB
SwapCached:            0 kB
Active:          7423120 kB
Inactive:        3901768 kB
SwapTotal:       2097148 kB
SwapFree:        2097148 kB
Dirty:               284 kB
HugePages_Total:       0
";

    #[test]
    fn parses_all_fields() {
        let info = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(info.total, 16284536);
        assert_eq!(info.free, 3741928);
        assert_eq!(info.available, 10222108);
        assert_eq!(info.buffers, 523056);
        assert_eq!(info.cached, 5612340);
    }

    #[test]
    fn swap_cached_does_not_shadow_cached() {
        let raw = "MemTotal: 1000 kB\nMemAvailable: 400 kB\nSwapCached: 77 kB\n";
        let info = parse_meminfo(raw).unwrap();
        assert_eq!(info.cached, 0);
    }

    #[test]
    fn absent_optional_fields_default_to_zero() {
        let raw = "MemTotal: 1000 kB\nMemAvailable: 400 kB\n";
        let info = parse_meminfo(raw).unwrap();
        assert_eq!(info.free, 0);
        assert_eq!(info.buffers, 0);
        assert_eq!(info.cached, 0);
        let usage = info.used_percent().unwrap();
        assert!((usage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn missing_total_is_malformed() {
        let err = parse_meminfo("MemFree: 100 kB\nMemAvailable: 50 kB\n").unwrap_err();
        assert!(matches!(err, SampleError::MalformedData { .. }));
    }

    #[test]
    fn missing_available_is_malformed() {
        let err = parse_meminfo("MemTotal: 100 kB\nMemFree: 50 kB\n").unwrap_err();
        assert!(matches!(err, SampleError::MalformedData { .. }));
    }

    #[test]
    fn unparseable_value_is_malformed() {
        let err = parse_meminfo("MemTotal: lots kB\nMemAvailable: 50 kB\n").unwrap_err();
        assert!(matches!(err, SampleError::MalformedData { .. }));
    }

    #[test]
    fn used_percent_from_total_and_available() {
        let raw = "MemTotal: 16000000 kB\nMemAvailable: 4000000 kB\n";
        let usage = parse_meminfo(raw).unwrap().used_percent().unwrap();
        assert!((usage - 75.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_is_degenerate() {
        let raw = "MemTotal: 0 kB\nMemAvailable: 0 kB\n";
        let err = parse_meminfo(raw).unwrap().used_percent().unwrap_err();
        assert!(matches!(err, SampleError::DegenerateSample { .. }));
    }

    #[test]
    fn same_input_same_percentage() {
        let first = parse_meminfo(MEMINFO).unwrap().used_percent().unwrap();
        let second = parse_meminfo(MEMINFO).unwrap().used_percent().unwrap();
        assert!((first - second).abs() < 1e-9);
    }
}
