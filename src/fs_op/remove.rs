use std::fs;
use std::io;
use std::path::Path;

use crate::fs_op::error::Result;

/// Remove the file, symlink or directory tree at `path`.
///
/// Returns `Ok(true)` when something was removed and `Ok(false)` when nothing
/// was there. A symlink is removed itself, never the tree it points to.
/// Permission and other filesystem errors are propagated.
pub fn remove_path(path: impl AsRef<Path>) -> Result<bool> {
    let p = path.as_ref();

    let md = match fs::symlink_metadata(p) {
        Ok(md) => md,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    if md.is_dir() {
        fs::remove_dir_all(p)?;
    } else {
        fs::remove_file(p)?;
    }
    tracing::info!("removed {}", p.display());
    Ok(true)
}
