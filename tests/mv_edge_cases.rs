#![cfg(unix)]

use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};

use tempfile::tempdir;

use ezpaths::fs_op::mv::move_path;
use ezpaths::AbsPath;

// Copying through a symlink to a directory copies the target's contents.
#[test]
fn symlink_to_dir_copy_copies_target_contents() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let target = tmp.path().join("target");
    fs::create_dir_all(&target)?;
    fs::write(target.join("inner.txt"), b"hello")?;

    let link = tmp.path().join("link_to_target");
    symlink(&target, &link)?;

    let dest_tmp = tempdir()?;
    let dest = dest_tmp.path().join("out");

    let copied = AbsPath::new(&link)?.copy(Some(dest.as_path()), "copy")?;
    assert_eq!(copied.as_path(), dest.as_path());

    let inner = dest.join("inner.txt");
    assert!(inner.exists(), "expected copied file exists at {:?}", inner);
    assert_eq!(fs::read_to_string(inner)?, "hello");
    assert!(!fs::symlink_metadata(&dest)?.file_type().is_symlink());
    Ok(())
}

// Deleting a symlink never touches what it points to.
#[test]
fn delete_symlink_to_dir_keeps_target() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let target = tmp.path().join("target");
    fs::create_dir_all(&target)?;
    fs::write(target.join("keep.txt"), b"k")?;
    let link = tmp.path().join("link");
    symlink(&target, &link)?;

    assert!(AbsPath::new(&link)?.delete()?);
    assert!(target.join("keep.txt").exists());
    Ok(())
}

// A failed move reports an error and leaves the source intact.
#[test]
fn move_path_errors_on_unwritable_dest_and_leaves_source_intact() -> Result<(), Box<dyn std::error::Error>> {
    // root ignores directory permissions
    if nix::unistd::geteuid().is_root() {
        return Ok(());
    }
    let tmp = tempdir()?;
    let src = tmp.path().join("sourcedir");
    fs::create_dir_all(&src)?;
    fs::write(src.join("file.txt"), b"data")?;

    let dest_parent = tempdir()?;
    let dest = dest_parent.path().join("dest");
    fs::set_permissions(dest_parent.path(), fs::Permissions::from_mode(0o555))?;

    let res = move_path(&src, &dest);
    fs::set_permissions(dest_parent.path(), fs::Permissions::from_mode(0o755))?;

    assert!(res.is_err(), "expected move_path to error when dest is unwritable");
    assert!(src.join("file.txt").exists(), "source should survive a failed move");
    Ok(())
}
