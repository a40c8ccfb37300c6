//! Shorthand methods for frequent filesystem path one-liners.
//!
//! The central type is [`AbsPath`], an always-absolute path value with
//! accessors for names and extensions plus thin wrappers around the usual
//! copy/move/delete/touch operations. The free functions it delegates to live
//! under [`fs_op`] and can be used on plain `std::path::Path` values as well.
//!
//! ```no_run
//! use ezpaths::AbsPath;
//!
//! # fn main() -> ezpaths::Result<()> {
//! let data = AbsPath::cwd()?.join("data").join("input.csv");
//! if data.exists() {
//!     let backup = data.copy(None, "backup")?;
//!     println!("backed up to {}", backup);
//! }
//! # Ok(())
//! # }
//! ```

pub mod fs_op;
pub mod logging;
pub mod search_path;
pub mod settings;

pub use crate::fs_op::abs_path::AbsPath;
pub use crate::fs_op::error::{FsOpError, Result};
pub use crate::fs_op::stat::PathType;
pub use crate::search_path::SearchPath;
pub use crate::settings::{LogSettings, Settings};
