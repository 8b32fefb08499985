use std::fs;
use std::thread;
use std::time::Duration;

use crate::error::{Result, SampleError};

const STAT_PATH: &str = "/proc/stat";

/// Spacing between the two /proc/stat reads. Fixed: these are one-shot
/// diagnostic tools, the window is not configurable.
pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Aggregate CPU time counters in jiffies since boot, taken from the first
/// four fields of the `cpu` summary line of /proc/stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuSample {
    pub fn total(&self) -> u64 {
        self.user + self.nice + self.system + self.idle
    }
}

/// Read one `CpuSample` from /proc/stat.
pub fn sample() -> Result<CpuSample> {
    let raw = fs::read_to_string(STAT_PATH).map_err(|e| SampleError::SourceUnavailable {
        subject: STAT_PATH.to_string(),
        source: e,
    })?;
    parse_stat(&raw)
}

/// Busy percentage over a one-second window: read, sleep, read again,
/// derive from the counter deltas.
pub fn usage_percent() -> Result<f64> {
    let prev = sample()?;
    thread::sleep(SAMPLE_WINDOW);
    let curr = sample()?;
    utilization(&prev, &curr)
}

/// Utilization between two samples. Deltas are signed: the counters are
/// cumulative and normally monotonic, but a reset pair still goes through
/// the same arithmetic and only a zero total delta is refused.
pub fn utilization(prev: &CpuSample, curr: &CpuSample) -> Result<f64> {
    let idle_delta = curr.idle as i64 - prev.idle as i64;
    let total_delta = curr.total() as i64 - prev.total() as i64;
    if total_delta == 0 {
        return Err(SampleError::DegenerateSample {
            subject: STAT_PATH.to_string(),
            detail: "no cpu time elapsed between samples".to_string(),
        });
    }
    Ok(100.0 * (1.0 - idle_delta as f64 / total_delta as f64))
}

// cpu  user nice system idle iowait irq softirq steal guest guest_nice
fn parse_stat(raw: &str) -> Result<CpuSample> {
    let line = raw
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| malformed("no aggregate cpu line"))?;

    let counters = line
        .split_whitespace()
        .skip(1)
        .take(4)
        .map(|v| v.parse::<u64>())
        .collect::<std::result::Result<Vec<u64>, _>>()
        .map_err(|_| malformed("cpu counter is not an unsigned integer"))?;
    if counters.len() < 4 {
        return Err(malformed("fewer than four cpu counters"));
    }

    Ok(CpuSample {
        user: counters[0],
        nice: counters[1],
        system: counters[2],
        idle: counters[3],
    })
}

fn malformed(detail: &str) -> SampleError {
    SampleError::MalformedData {
        subject: STAT_PATH.to_string(),
        detail: detail.to_string(),
    }
}
