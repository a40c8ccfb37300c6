//! Preserve permissions, timestamps and (on Unix) ownership, xattrs and ACLs
//! when copying.
//!
//! For a single file the permission and timestamp steps are core and their
//! errors propagate. Everything Unix-specific is best-effort because it is
//! non-portable and often needs privileges the caller does not have. For a
//! directory tree every step is best-effort so one odd entry does not abort a
//! copy that has already written its data.

use std::fs;
use std::io;
use std::path::Path;

use filetime::{set_file_times, FileTime};
use walkdir::WalkDir;

#[cfg(unix)]
mod unix_extra {
    use super::*;
    use nix::unistd::{chown, Gid, Uid};
    use std::os::unix::fs::MetadataExt;

    const ACL_XATTRS: [&str; 2] = ["system.posix_acl_access", "system.posix_acl_default"];

    /// Copy ownership, extended attributes and POSIX ACL blobs. Failures are
    /// ignored.
    pub(super) fn copy_unix_extras(src: &Path, dst: &Path) {
        if let Ok(meta) = fs::metadata(src) {
            let _ = chown(dst, Some(Uid::from_raw(meta.uid())), Some(Gid::from_raw(meta.gid())));
        }

        if let Ok(names) = xattr::list(src) {
            for name in names {
                if let Ok(Some(val)) = xattr::get(src, &name) {
                    let _ = xattr::set(dst, &name, &val);
                }
            }
        }

        // `list` hides the system namespace on some kernels; ask for ACLs by name.
        for name in ACL_XATTRS {
            if let Ok(Some(val)) = xattr::get(src, name) {
                let _ = xattr::set(dst, name, &val);
            }
        }
    }
}

/// Copy permission bits from `src` to `dst`.
pub(crate) fn copy_permissions(src: &Path, dst: &Path) -> io::Result<()> {
    let perms = fs::metadata(src)?.permissions();
    fs::set_permissions(dst, perms)
}

/// Copy access and modification times from `src` to `dst`.
pub(crate) fn copy_timestamps(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    set_file_times(dst, atime, mtime)
}

/// Preserve metadata from `src` on `dst`.
///
/// Files: permissions and timestamps are applied and their errors propagate.
/// Directories: the source tree is walked and each entry's metadata is applied
/// to the matching path under `dst` if one exists. Entries are visited
/// deepest-first so a directory's mtime is set after its children were
/// touched.
pub fn preserve_all_metadata(src: &Path, dst: &Path) -> io::Result<()> {
    if !src.exists() || !dst.exists() {
        return Ok(());
    }

    if src.is_file() {
        copy_permissions(src, dst)?;
        copy_timestamps(src, dst)?;
        #[cfg(unix)]
        unix_extra::copy_unix_extras(src, dst);
        return Ok(());
    }

    for entry in WalkDir::new(src)
        .follow_links(true)
        .contents_first(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        apply_metadata_to_target(entry.path(), src, dst);
    }
    Ok(())
}

fn apply_metadata_to_target(path: &Path, src_root: &Path, dst_root: &Path) {
    let Ok(rel) = path.strip_prefix(src_root) else {
        return;
    };
    let target = dst_root.join(rel);
    if !target.exists() {
        return;
    }

    #[cfg(unix)]
    unix_extra::copy_unix_extras(path, &target);
    let _ = copy_permissions(path, &target);
    let _ = copy_timestamps(path, &target);
}
