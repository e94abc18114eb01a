use crate::coords::{ColorRgba, Viewport};
use crate::pipeline::PipelineRef;
use crate::resource::{BufferRef, FramebufferMask, FramebufferRef, TextureRef};

use super::stream::{EncodedBatch, ParamStack, ResourceTable};
use super::{Command, Primitive};

/// Append-only recording of graphics operations.
///
/// Recording never touches a device and never validates against device
/// capabilities. References passed in are held until [`clear`](Self::clear)
/// or drop, so an unbound slot should be recorded explicitly with `None`.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    commands: Vec<Command>,
}

impl Batch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all recorded commands and the references they hold. Keeps capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in record order.
    #[inline]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Flattens the batch into the opcode / param stack / resource table layout.
    pub fn encode(&self) -> EncodedBatch {
        EncodedBatch::from_commands(&self.commands)
    }

    /// Scalar operands of every command, in push order.
    pub fn params(&self) -> ParamStack {
        self.encode().params
    }

    /// Object references of every command, in push order.
    pub fn resources(&self) -> ResourceTable {
        self.encode().resources
    }

    #[inline]
    fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    // ── draws ─────────────────────────────────────────────────────────────

    pub fn draw(&mut self, primitive: Primitive, vertex_count: u32, start_vertex: u32) {
        self.push(Command::Draw {
            primitive,
            vertex_count,
            start_vertex,
        });
    }

    pub fn draw_indexed(&mut self, primitive: Primitive, index_count: u32, start_index: u32) {
        self.push(Command::DrawIndexed {
            primitive,
            index_count,
            start_index,
        });
    }

    pub fn draw_instanced(
        &mut self,
        instance_count: u32,
        primitive: Primitive,
        vertex_count: u32,
        start_vertex: u32,
        start_instance: u32,
    ) {
        self.push(Command::DrawInstanced {
            instance_count,
            primitive,
            vertex_count,
            start_vertex,
            start_instance,
        });
    }

    pub fn draw_indexed_instanced(
        &mut self,
        instance_count: u32,
        primitive: Primitive,
        index_count: u32,
        start_index: u32,
        start_instance: u32,
    ) {
        self.push(Command::DrawIndexedInstanced {
            instance_count,
            primitive,
            index_count,
            start_index,
            start_instance,
        });
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn set_pipeline(&mut self, pipeline: Option<&PipelineRef>) {
        self.push(Command::SetPipeline(pipeline.cloned()));
    }

    pub fn set_framebuffer(&mut self, framebuffer: Option<&FramebufferRef>) {
        self.push(Command::SetFramebuffer(framebuffer.cloned()));
    }

    pub fn set_viewport_transform(&mut self, viewport: Viewport) {
        self.push(Command::SetViewportTransform(viewport));
    }

    pub fn set_uniform_buffer(&mut self, slot: u32, buffer: Option<&BufferRef>) {
        self.push(Command::SetUniformBuffer {
            slot,
            buffer: buffer.cloned(),
        });
    }

    pub fn set_resource_texture(&mut self, slot: u32, texture: Option<&TextureRef>) {
        self.push(Command::SetResourceTexture {
            slot,
            texture: texture.cloned(),
        });
    }

    pub fn clear_color_framebuffer(&mut self, targets: FramebufferMask, color: ColorRgba) {
        self.push(Command::ClearColorFramebuffer { targets, color });
    }

    pub fn enable_stereo(&mut self, enabled: bool) {
        self.push(Command::EnableStereo(enabled));
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
