//! Utility helpers: atomic file output.
pub mod files;

pub use files::write_atomic;
