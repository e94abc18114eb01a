//! Veil render tasks.
//!
//! Tasks own their GPU resources for their whole lifetime and record one
//! `veil_gpu::Batch` per invocation, submitted through the `RenderContext`.

mod args;
mod task;

pub mod blur;
pub mod shaders;

pub use args::{RenderArgs, RenderContext, ViewFrustum};
pub use blur::{BlurConfig, BlurGaussian};
pub use task::Task;
