use std::fs;
use std::io;
use std::path::Path;

use fs_extra::file::{copy as fs_extra_copy, CopyOptions};
use walkdir::WalkDir;

use crate::fs_op::helpers::unique_temp_sibling;
use crate::fs_op::metadata::preserve_all_metadata;

/// Knobs shared by the file and tree copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyBehavior {
    /// Buffer used by `fs_extra` when streaming file contents.
    pub buffer_size: usize,
    /// Apply permissions/timestamps (and Unix extras) of the source.
    pub preserve_metadata: bool,
}

impl Default for CopyBehavior {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            preserve_metadata: true,
        }
    }
}

/// Copy the file `src` to `dst`, replacing `dst` if it is a file.
///
/// Data is streamed into a hidden temp file next to `dst` and renamed into
/// place, so callers never observe a half-written destination. The parent of
/// `dst` must exist. Returns the number of bytes copied.
pub fn copy_file(src: &Path, dst: &Path, behavior: &CopyBehavior) -> io::Result<u64> {
    let tmp = unique_temp_sibling(dst, "copy");
    let mut options = CopyOptions::new();
    options.overwrite = false;
    options.buffer_size = behavior.buffer_size;

    let copied = fs_extra_copy(src, &tmp, &options).map_err(into_io_error);
    let n = match copied {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };
    if behavior.preserve_metadata {
        if let Err(e) = preserve_all_metadata(src, &tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    }
    fs::rename(&tmp, dst).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })?;
    tracing::debug!("copied {} bytes from {} to {}", n, src.display(), dst.display());
    Ok(n)
}

/// Map an `fs_extra` failure back onto the `io::Error` the host reported, or
/// the closest `io::ErrorKind` when `fs_extra` detected the problem itself.
fn into_io_error(e: fs_extra::error::Error) -> io::Error {
    use fs_extra::error::ErrorKind;

    let kind = match e.kind {
        ErrorKind::Io(inner) => return inner,
        ErrorKind::NotFound => io::ErrorKind::NotFound,
        ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
        ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
        ErrorKind::Interrupted => io::ErrorKind::Interrupted,
        ErrorKind::InvalidFile | ErrorKind::InvalidFolder | ErrorKind::InvalidFileName | ErrorKind::InvalidPath => {
            io::ErrorKind::InvalidInput
        }
        _ => io::ErrorKind::Other,
    };
    io::Error::new(kind, e.to_string())
}

fn walk_error(e: walkdir::Error) -> io::Error {
    let msg = e.to_string();
    e.into_io_error().unwrap_or_else(|| io::Error::other(msg))
}

/// Recursively copy the directory `src` to `dst`, which must not exist yet.
///
/// The source listing is taken before `dst` is created, so copying a tree
/// into one of its own subdirectories copies the original contents once.
/// Symlinks inside the tree are followed, so their targets are copied as
/// regular files or directories. Other special files are skipped. Metadata is
/// applied to the whole mirrored tree after the data has been written.
/// Returns the total number of bytes copied.
pub fn copy_tree(src: &Path, dst: &Path, behavior: &CopyBehavior) -> io::Result<u64> {
    let entries = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(walk_error)?;

    fs::create_dir_all(dst)?;
    let mut total = 0;

    for entry in entries {
        let rel = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dst.join(rel);
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir_all(&target)?;
        } else if ft.is_file() {
            let per_file = CopyBehavior {
                preserve_metadata: false,
                ..*behavior
            };
            total += copy_file(entry.path(), &target, &per_file)?;
        } else {
            tracing::debug!("skipping special file {}", entry.path().display());
        }
    }

    if behavior.preserve_metadata {
        preserve_all_metadata(src, dst)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_file_replaces_existing_destination() -> io::Result<()> {
        let td = tempdir()?;
        let src = td.path().join("src.txt");
        let dst = td.path().join("dst.txt");
        fs::write(&src, b"new")?;
        fs::write(&dst, b"old contents")?;

        let n = copy_file(&src, &dst, &CopyBehavior::default())?;
        assert_eq!(n, 3);
        assert_eq!(fs::read(&dst)?, b"new");
        Ok(())
    }

    #[test]
    fn copy_file_missing_source_leaves_no_temp() -> io::Result<()> {
        let td = tempdir()?;
        let err = copy_file(&td.path().join("nope"), &td.path().join("dst"), &CopyBehavior::default())
            .expect_err("source is missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs::read_dir(td.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn copy_tree_mirrors_nested_structure() -> io::Result<()> {
        let td = tempdir()?;
        let src = td.path().join("src");
        fs::create_dir_all(src.join("a/b"))?;
        fs::create_dir_all(src.join("empty"))?;
        fs::write(src.join("top.txt"), b"top")?;
        fs::write(src.join("a/b/deep.txt"), b"deep")?;

        let dst = td.path().join("dst");
        let total = copy_tree(&src, &dst, &CopyBehavior::default())?;

        assert_eq!(total, 7);
        assert_eq!(fs::read_to_string(dst.join("top.txt"))?, "top");
        assert_eq!(fs::read_to_string(dst.join("a/b/deep.txt"))?, "deep");
        assert!(dst.join("empty").is_dir());
        Ok(())
    }

    #[test]
    fn copy_tree_into_own_subdirectory_copies_once() -> io::Result<()> {
        let td = tempdir()?;
        let src = td.path().join("src");
        fs::create_dir_all(src.join("a"))?;
        fs::write(src.join("a/f.txt"), b"f")?;

        let dst = src.join("inner");
        let total = copy_tree(&src, &dst, &CopyBehavior::default())?;

        assert_eq!(total, 1);
        assert_eq!(fs::read_to_string(dst.join("a/f.txt"))?, "f");
        assert!(!dst.join("inner").exists());
        Ok(())
    }
}
