use std::path::{Component, Path, PathBuf};

use crate::fs_op::error::Result;

/// Resolve `input` to an absolute, lexically normalized path.
///
/// Behaviour:
/// - Absolute inputs are only normalized.
/// - Relative inputs (including the empty string) are joined onto the
///   process's current working directory first.
/// - `.` components are dropped and `..` pops the previous component; a `..`
///   at the root stays at the root.
///
/// Symlinks are never resolved, so two spellings of the same file through a
/// link stay distinct. Failing to read the current directory is the only
/// error.
pub fn absolutize(input: &Path) -> Result<PathBuf> {
    if input.is_absolute() {
        return Ok(normalize_lexically(input));
    }
    let cwd = std::env::current_dir()?;
    Ok(absolutize_against(input, &cwd))
}

/// Like [`absolutize`] but resolves relative inputs against `base` instead of
/// the current working directory. `base` is expected to be absolute.
pub fn absolutize_against(input: &Path, base: &Path) -> PathBuf {
    if input.is_absolute() {
        normalize_lexically(input)
    } else {
        normalize_lexically(&base.join(input))
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// Repeated and trailing separators disappear as a side effect of
/// re-assembling the path from its components.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut anchored = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                result.push(prefix.as_os_str());
                anchored = true;
            }
            Component::RootDir => {
                result.push(component);
                anchored = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_anchor = result
                    .components()
                    .last()
                    .map_or(true, |c| matches!(c, Component::RootDir | Component::Prefix(_)));
                if at_anchor && anchored {
                    // `/..` is `/`
                    continue;
                }
                if at_anchor
                    || result
                        .components()
                        .last()
                        .is_some_and(|c| c == Component::ParentDir)
                {
                    result.push("..");
                } else {
                    result.pop();
                }
            }
            Component::Normal(name) => result.push(name),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn absolute_path_is_only_normalized() {
        let got = absolutize(Path::new("/root/dir/./sub/../file.ext")).unwrap();
        assert_eq!(got, PathBuf::from("/root/dir/file.ext"));
    }

    #[test]
    fn relative_resolves_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let got = absolutize(Path::new("file.ext")).unwrap();
        assert_eq!(got, cwd.join("file.ext"));
    }

    #[test]
    fn empty_input_is_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolutize(Path::new("")).unwrap(), cwd);
    }

    #[test]
    fn relative_resolves_against_base() {
        let td = TempDir::new().unwrap();
        let got = absolutize_against(Path::new("a/../b"), td.path());
        assert_eq!(got, td.path().join("b"));
    }

    #[cfg(unix)]
    #[test]
    fn parent_of_root_stays_at_root() {
        assert_eq!(normalize_lexically(Path::new("/../..")), PathBuf::from("/"));
        assert_eq!(normalize_lexically(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[cfg(unix)]
    #[test]
    fn trailing_and_doubled_separators_collapse() {
        assert_eq!(normalize_lexically(Path::new("/a//b/")), PathBuf::from("/a/b"));
    }

    #[test]
    fn leading_parent_dirs_kept_for_relative_input() {
        assert_eq!(normalize_lexically(Path::new("../../a")), PathBuf::from("../../a"));
    }
}
