use std::fs;
use std::path::{Path, PathBuf};

use crate::fs_op::copy::{copy_file, copy_tree, CopyBehavior};
use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::helpers::is_cross_device;

/// Resolve the destination of a copy or move: if `dst` is an existing
/// directory the entry lands inside it under `src_name`, otherwise `dst` is
/// the final path.
pub fn resolve_target(dst: &Path, src_name: &std::ffi::OsStr) -> PathBuf {
    if dst.is_dir() {
        dst.join(src_name)
    } else {
        dst.to_path_buf()
    }
}

/// Move `src` to `dst` and return where it ended up.
///
/// An existing directory at `dst` means "move into it". The move is a plain
/// `rename`; if the OS refuses because source and destination are on
/// different filesystems, the entry is copied (with metadata) and the source
/// removed afterwards. Any other rename failure is returned untouched.
pub fn move_path(src: &Path, dst: &Path) -> Result<PathBuf> {
    let name = src.file_name().ok_or_else(|| FsOpError::PathContext {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        msg: "source has no file name".to_string(),
    })?;
    let final_dest = resolve_target(dst, name);
    move_exact(src, &final_dest)?;
    Ok(final_dest)
}

/// Move `src` to exactly `dst`, with no "move into" resolution.
///
/// Same rename-then-copy fallback as [`move_path`]. Whether an existing `dst`
/// is replaced is up to the OS `rename`.
pub fn move_exact(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            tracing::debug!(
                "rename {} -> {} crosses devices, falling back to copy",
                src.display(),
                dst.display()
            );
            copy_then_remove(src, dst)
        }
        Err(e) => Err(e.into()),
    }
}

fn copy_then_remove(src: &Path, dst: &Path) -> Result<()> {
    let behavior = CopyBehavior::default();
    let context = |e: std::io::Error| FsOpError::PathContext {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        msg: format!("fallback copy failed: {}", e),
    };

    if src.is_dir() {
        copy_tree(src, dst, &behavior).map_err(context)?;
        fs::remove_dir_all(src)?;
    } else {
        copy_file(src, dst, &behavior).map_err(context)?;
        fs::remove_file(src)?;
    }
    Ok(())
}
