//! Deferred command recording.
//!
//! A [`Batch`] is filled on the render thread, handed to a
//! [`Context`](crate::context::Context) for playback, and dropped (or cleared)
//! once the backend is done with it. Every command carries its operands inline,
//! so a recorder cannot push the wrong number of values for an opcode; the flat
//! [`EncodedBatch`] layout is derived from the commands, never written by hand.

mod recorder;
mod command;
mod stream;

pub use recorder::Batch;
pub use command::{Arity, Command, Opcode, Param, Primitive};
pub use stream::{EncodedBatch, ParamCursor, ParamStack, ResourceTable, StreamError};
