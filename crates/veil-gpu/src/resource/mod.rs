//! GPU-resident objects as seen from the recording side.
//!
//! Nothing here talks to a device. Each type mirrors the state a backend needs
//! to create or update the real object, and is shared through [`Handle`] so a
//! recorded [`Batch`](crate::batch::Batch) keeps it alive until playback ends.

mod buffer;
mod framebuffer;
mod handle;
mod texture;

pub use buffer::{Buffer, BufferRef, BufferView};
pub use framebuffer::{Framebuffer, FramebufferMask, FramebufferRef, MAX_RENDER_BUFFERS};
pub use handle::{Handle, Resource, ResourceKind};
pub use texture::{Sampler, Texture, TextureRef};
