use std::fs::{self, OpenOptions};
use std::path::Path;

use filetime::{set_file_times, FileTime};

use crate::fs_op::error::Result;
use crate::fs_op::stat::PathType;

/// Create `path` and any missing parents as directories.
///
/// Returns `Ok(false)` without touching the filesystem when anything (file,
/// directory or dangling symlink) is already at `path`.
pub fn create_dir_chain<P: AsRef<Path>>(path: P) -> Result<bool> {
    let p = path.as_ref();
    if PathType::of_entry(p) != PathType::NotFound {
        return Ok(false);
    }
    fs::create_dir_all(p)?;
    tracing::info!("created directory chain {}", p.display());
    Ok(true)
}

/// Create `path` as an empty file if it is missing and set its access and
/// modification times to now.
///
/// The file is opened in append mode so existing contents are kept. The
/// parent directory must exist; a directory at `path` is an error.
pub fn touch<P: AsRef<Path>>(path: P) -> Result<()> {
    let p = path.as_ref();
    OpenOptions::new().create(true).append(true).open(p)?;
    let now = FileTime::now();
    set_file_times(p, now, now)?;
    tracing::debug!("touched {}", p.display());
    Ok(())
}
