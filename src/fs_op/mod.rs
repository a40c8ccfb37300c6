//! Filesystem helpers and the `AbsPath` type built on them.
//!
//! The helpers are free functions over `&Path` so they can be used without
//! an `AbsPath`; `AbsPath` adds absolutization and name handling on top.

pub mod abs_path;
pub mod copy;
pub mod create;
pub mod error;
pub mod helpers;
pub mod metadata;
pub mod mv;
pub mod path;
pub mod remove;
pub mod stat;
