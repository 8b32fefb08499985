use std::ffi::CString;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::error::{Result, SampleError};

/// Capacity fields for one mounted filesystem, from statvfs(2).
/// Block counts are in `fragment_size`-byte units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskStat {
    pub blocks: u64,
    pub blocks_free: u64,
    pub fragment_size: u64,
}

impl DiskStat {
    pub fn total_bytes(&self) -> u64 {
        self.blocks.saturating_mul(self.fragment_size)
    }

    pub fn free_bytes(&self) -> u64 {
        self.blocks_free.saturating_mul(self.fragment_size)
    }

    pub fn used_percent(&self) -> Result<f64> {
        let total = self.total_bytes();
        if total == 0 {
            return Err(SampleError::DegenerateSample {
                subject: "statvfs".to_string(),
                detail: "filesystem reports zero capacity".to_string(),
            });
        }
        let used = total.saturating_sub(self.free_bytes());
        Ok(100.0 * used as f64 / total as f64)
    }
}

/// Query filesystem statistics for `path`.
pub fn sample(path: &Path) -> Result<DiskStat> {
    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| unavailable(
        path,
        io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"),
    ))?;

    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        return Err(unavailable(path, io::Error::last_os_error()));
    }
    let stat = unsafe { stat.assume_init() };

    Ok(DiskStat {
        blocks: stat.f_blocks as u64,
        blocks_free: stat.f_bfree as u64,
        fragment_size: stat.f_frsize as u64,
    })
}

pub fn usage_percent(path: &Path) -> Result<f64> {
    sample(path)?.used_percent()
}

fn unavailable(path: &Path, source: io::Error) -> SampleError {
    SampleError::SourceUnavailable {
        subject: path.display().to_string(),
        source,
    }
}
