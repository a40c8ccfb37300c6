//! `AbsPath`: an always-absolute path with shorthand accessors and thin
//! wrappers around the filesystem helpers in this module tree.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::fs_op::copy::{copy_file, copy_tree};
use crate::fs_op::error::{FsOpError, Result};
use crate::fs_op::path::{absolutize, normalize_lexically};
use crate::fs_op::stat::PathType;
use crate::fs_op::{create, helpers, mv, remove};
use crate::search_path::SearchPath;
use crate::settings::Settings;

/// A single filesystem location, stored in absolute, lexically normalized
/// form.
///
/// Relative inputs are resolved against the current working directory once,
/// when the value is built; changing directory later does not move an
/// existing `AbsPath`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbsPath {
    path: PathBuf,
}

impl AbsPath {
    /// Resolve `input` to an absolute path. An empty input means the current
    /// working directory.
    pub fn new(input: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            path: absolutize(input.as_ref())?,
        })
    }

    /// The current working directory.
    pub fn cwd() -> Result<Self> {
        Self::new("")
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.path.clone()
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }

    /// Debug form, e.g. `<AbsPath: /srv/data>`.
    pub fn to_display_string(&self) -> String {
        format!("<AbsPath: {}>", self.path.display())
    }

    /// Append `other` as a new segment. An absolute `other` replaces this
    /// path entirely, as with [`Path::join`].
    pub fn join(&self, other: impl AsRef<Path>) -> Self {
        Self {
            path: normalize_lexically(&self.path.join(other)),
        }
    }

    /// Same as [`AbsPath::join`].
    pub fn divide(&self, other: impl AsRef<Path>) -> Self {
        self.join(other)
    }

    /// Whether anything is at this path right now. Symlinks are followed.
    pub fn exists(&self) -> bool {
        self.kind() != PathType::NotFound
    }

    pub fn kind(&self) -> PathType {
        PathType::of(&self.path)
    }

    pub fn is_file(&self) -> bool {
        self.kind() == PathType::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == PathType::Directory
    }

    /// Compare with the absolute form of `other`, character for character.
    /// Two spellings that reach the same file through a symlink are not
    /// equal.
    pub fn equals(&self, other: impl AsRef<Path>) -> Result<bool> {
        Ok(absolutize(other.as_ref())? == self.path)
    }

    /// The directory containing this path, `levels` further steps up. The
    /// root is its own parent.
    pub fn parent(&self, levels: usize) -> Self {
        let mut current = self.path.as_path();
        for _ in 0..=levels {
            match current.parent() {
                Some(p) => current = p,
                None => break,
            }
        }
        Self {
            path: current.to_path_buf(),
        }
    }

    /// Name of the directory this path denotes or lives in.
    ///
    /// A path without an extension is taken to be a directory and its own
    /// name is returned; otherwise the parent's name is returned. The entry
    /// type on disk is not consulted, so extension-less files and dot-files
    /// such as `.gitignore` count as directories.
    pub fn parent_name(&self) -> String {
        if self.extension().is_empty() {
            self.file_name()
        } else {
            self.parent(0).file_name()
        }
    }

    /// Split the final component into `(stem, extension)`.
    ///
    /// The extension starts at the last dot and keeps it (`"a.tar.gz"` gives
    /// `("a.tar", ".gz")`). Leading dots never start an extension, so
    /// `".bashrc"` has none. Names that are not valid Unicode are shown
    /// lossily; see [`AbsPath::split_name_extension_os`].
    pub fn split_name_extension(&self) -> (String, String) {
        let (stem, ext) = self.split_name_extension_os();
        (
            stem.to_string_lossy().into_owned(),
            ext.to_string_lossy().into_owned(),
        )
    }

    /// [`AbsPath::split_name_extension`] without the lossy conversion.
    pub fn split_name_extension_os(&self) -> (OsString, OsString) {
        let name = self.file_name_os();
        let bytes = name.as_encoded_bytes();
        let leading = bytes.iter().take_while(|&&b| b == b'.').count();
        match bytes[leading..].iter().rposition(|&b| b == b'.') {
            Some(i) => {
                let (stem, ext) = bytes.split_at(leading + i);
                (os_string_from_bytes(stem), os_string_from_bytes(ext))
            }
            None => (name.to_os_string(), OsString::new()),
        }
    }

    pub fn extension(&self) -> String {
        self.split_name_extension().1
    }

    pub fn base_name_no_ext(&self) -> String {
        self.split_name_extension().0
    }

    /// The final component, extension included. Empty for the root.
    pub fn file_name(&self) -> String {
        self.file_name_os().to_string_lossy().into_owned()
    }

    pub fn file_name_os(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Insert this path into `search` at `index` (clamped to the end).
    pub fn register_to_search_path(&self, search: &mut SearchPath, index: usize) {
        tracing::debug!("registering {} at search path index {}", self, index);
        search.insert(index, self.path.clone());
    }

    /// [`AbsPath::register_to_search_path`] on the process-wide list.
    pub fn register_to_global_search_path(&self, index: usize) {
        self.register_to_search_path(&mut SearchPath::global(), index);
    }

    /// Remove the file, symlink or whole directory tree at this path.
    /// `Ok(false)` means nothing was there.
    pub fn delete(&self) -> Result<bool> {
        remove::remove_path(&self.path)
    }

    /// Point this value at `parent/<new_name><current extension>`.
    ///
    /// Only the in-memory value changes; use [`AbsPath::rename_on_disk`] or
    /// [`AbsPath::move_to`] to move the entry itself. `new_name` must be a
    /// single, non-empty path component.
    pub fn compute_renamed_location(&mut self, new_name: &str) -> Result<&AbsPath> {
        self.path = self.renamed_location(new_name)?;
        Ok(&*self)
    }

    /// Rename the entry on disk within its directory, keeping the extension,
    /// and update this value to the new location.
    ///
    /// The entry always ends up at exactly `parent/<new_name><ext>`. An
    /// existing directory under that name is an `AlreadyExists` error; the
    /// entry is never moved into it.
    pub fn rename_on_disk(&mut self, new_name: &str) -> Result<&AbsPath> {
        let target = self.renamed_location(new_name)?;
        if target != self.path && PathType::of_entry(&target) == PathType::Directory {
            tracing::warn!("cannot rename {}: directory {} is in the way", self, target.display());
            return Err(FsOpError::AlreadyExists(target));
        }

        mv::move_exact(&self.path, &target)?;
        let landed = Self { path: target };
        landed.check_landed()?;
        tracing::info!("renamed {} to {}", self, landed);
        *self = landed;
        Ok(&*self)
    }

    fn renamed_location(&self, new_name: &str) -> Result<PathBuf> {
        let plain = !new_name.is_empty()
            && new_name != "."
            && new_name != ".."
            && !new_name.chars().any(std::path::is_separator);
        if !plain {
            tracing::warn!("rejecting rename of {} to {:?}", self, new_name);
            return Err(FsOpError::InvalidName(new_name.to_string()));
        }
        let mut file_name = OsString::from(new_name);
        file_name.push(self.split_name_extension_os().1);
        Ok(self.parent(0).path.join(file_name))
    }

    /// Copy this file or directory tree.
    ///
    /// With no `destination` the copy is placed next to the source as
    /// `<stem>_<suffix><ext>`. Returns where the copy ended up.
    pub fn copy(&self, destination: Option<&Path>, suffix: &str) -> Result<AbsPath> {
        let settings = Settings {
            copy_suffix: suffix.to_string(),
            ..Settings::default()
        };
        self.copy_with(destination, &settings)
    }

    /// [`AbsPath::copy`] with the suffix, buffer size and metadata handling
    /// taken from `settings`.
    ///
    /// A file copied onto an existing directory lands inside it; an existing
    /// file is replaced. A directory is copied as a whole tree and its
    /// destination must not exist yet.
    pub fn copy_with(&self, destination: Option<&Path>, settings: &Settings) -> Result<AbsPath> {
        let target = match destination {
            Some(dest) => {
                let dest = absolutize(dest)?;
                if self.is_file() {
                    mv::resolve_target(&dest, self.file_name_os())
                } else {
                    dest
                }
            }
            None => {
                let (mut name, ext) = self.split_name_extension_os();
                name.push("_");
                name.push(&settings.copy_suffix);
                name.push(ext);
                self.parent(0).path.join(name)
            }
        };

        if target == self.path {
            return Err(FsOpError::SameFile(target));
        }

        let behavior = settings.copy_behavior();
        match self.kind() {
            PathType::Directory => {
                if target.exists() {
                    return Err(FsOpError::AlreadyExists(target));
                }
                copy_tree(&self.path, &target, &behavior)?;
            }
            _ => {
                copy_file(&self.path, &target, &behavior)?;
            }
        }

        let copied = Self { path: target };
        copied.check_landed()?;
        tracing::info!("copied {} to {}", self, copied);
        Ok(copied)
    }

    /// Move the entry to `destination` (into it, if it is an existing
    /// directory) and update this value to the new location.
    pub fn move_to(&mut self, destination: impl AsRef<Path>) -> Result<&AbsPath> {
        let destination = destination.as_ref();
        if destination.as_os_str().is_empty() {
            tracing::warn!("move of {} requested without a destination", self);
            return Err(FsOpError::MissingDestination);
        }

        let dest = absolutize(destination)?;
        let landed = Self {
            path: mv::move_path(&self.path, &dest)?,
        };
        landed.check_landed()?;
        tracing::info!("moved {} to {}", self, landed);
        *self = landed;
        Ok(&*self)
    }

    /// Create this path as a directory, with all missing parents.
    /// `Ok(false)` means something was already there and nothing changed.
    pub fn create_directory_chain(&self) -> Result<bool> {
        create::create_dir_chain(&self.path)
    }

    /// Create the file if missing and set its access/modification time to now.
    pub fn touch(&self) -> Result<()> {
        create::touch(&self.path)
    }

    pub fn read_to_string(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    /// Replace the file's contents atomically (temp file + rename).
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        helpers::atomic_write(&self.path, data.as_ref())?;
        Ok(())
    }

    fn check_landed(&self) -> Result<()> {
        if std::fs::symlink_metadata(&self.path).is_err() {
            tracing::error!("expected {} to exist after the operation", self);
            return Err(FsOpError::DestinationMismatch {
                expected: self.path.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(unix)]
fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes).to_os_string()
}

#[cfg(not(unix))]
fn os_string_from_bytes(bytes: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(bytes).into_owned())
}

impl fmt::Display for AbsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for AbsPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl From<AbsPath> for PathBuf {
    fn from(p: AbsPath) -> Self {
        p.path
    }
}
