//! The two Entity Store backends.
//!
//! Call sites depend on the `blog-core` store traits only; which backend is
//! active is decided once at startup by configuration.

pub mod file;
pub mod postgres;
