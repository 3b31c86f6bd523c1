//! Filesystem output.
//!
//! Every file goes through [`atomic::atomic_write`] so a failed run never
//! leaves a half-written manifest behind.

mod atomic;
mod writer;

pub use writer::write_artifacts;
