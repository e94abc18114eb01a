//! Veil GPU layer.
//!
//! Device-agnostic resource descriptions and the deferred command recorder
//! (`Batch`) that render tasks fill and backends replay.

pub mod batch;
pub mod context;
pub mod coords;
pub mod logging;
pub mod pipeline;
pub mod resource;

pub use batch::{Batch, Command, Opcode, Primitive};
pub use context::{Backend, Context};
