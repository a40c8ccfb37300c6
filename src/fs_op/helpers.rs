use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Global sequence so rapid calls from one process never share a suffix,
/// even if the clock resolution is coarse.
static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(0);

/// Build a hidden temporary path next to `target`, e.g.
/// `dir/.tmp_ezpaths.<hex>`. The file is not created.
pub fn unique_temp_sibling(target: &Path, tag: &str) -> PathBuf {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed);
    let raw = format!("{:x}{:x}{:x}", std::process::id(), nanos, seq);
    // Keep the low-order, fast-changing digits.
    let suffix = &raw[raw.len().saturating_sub(12)..];
    dir.join(format!(".tmp_{}.{}", tag, suffix))
}

/// Write `data` to `target` atomically by writing to a temporary file in the
/// same directory and then renaming into place. Readers never observe a
/// partially-written file. The parent directory must already exist.
pub fn atomic_write(target: &Path, data: &[u8]) -> io::Result<()> {
    if target.parent().is_none() {
        return fs::write(target, data);
    }
    let tmp = unique_temp_sibling(target, "atomic_write");
    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, target).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

/// Whether `err` is the OS refusing a rename across filesystems.
pub fn is_cross_device(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        // ERROR_NOT_SAME_DEVICE
        err.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = err;
        false
    }
}
