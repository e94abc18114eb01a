//! Executor boundary.
//!
//! A [`Backend`] replays batches against a real device. [`Context`] owns one
//! and is the only way recorded batches leave the render task layer.

mod backend;
mod trace;

pub use backend::{Backend, Context};
pub use trace::{TraceBackend, TraceStats};
