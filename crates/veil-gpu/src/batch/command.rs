use crate::coords::{ColorRgba, Viewport};
use crate::pipeline::PipelineRef;
use crate::resource::{BufferRef, FramebufferMask, FramebufferRef, Resource, TextureRef};

/// Primitive assembly mode for draws.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

impl Primitive {
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Primitive::Points => wgpu::PrimitiveTopology::PointList,
            Primitive::Lines => wgpu::PrimitiveTopology::LineList,
            Primitive::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Primitive::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}

/// One scalar operand in the flat param stack.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Param {
    Int(i32),
    Uint(u32),
    Float(f32),
    Bool(bool),
    Primitive(Primitive),
}

/// Closed set of operations a batch can hold.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Opcode {
    Draw,
    DrawIndexed,
    DrawInstanced,
    DrawIndexedInstanced,
    SetPipeline,
    SetFramebuffer,
    SetViewportTransform,
    SetUniformBuffer,
    SetResourceTexture,
    ClearColorFramebuffer,
    EnableStereo,
}

/// Fixed operand shape of an opcode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Arity {
    pub params: usize,
    pub resources: usize,
}

impl Opcode {
    pub const ALL: [Opcode; 11] = [
        Opcode::Draw,
        Opcode::DrawIndexed,
        Opcode::DrawInstanced,
        Opcode::DrawIndexedInstanced,
        Opcode::SetPipeline,
        Opcode::SetFramebuffer,
        Opcode::SetViewportTransform,
        Opcode::SetUniformBuffer,
        Opcode::SetResourceTexture,
        Opcode::ClearColorFramebuffer,
        Opcode::EnableStereo,
    ];

    pub const fn arity(self) -> Arity {
        let (params, resources) = match self {
            Opcode::Draw | Opcode::DrawIndexed => (3, 0),
            Opcode::DrawInstanced | Opcode::DrawIndexedInstanced => (5, 0),
            Opcode::SetPipeline | Opcode::SetFramebuffer => (0, 1),
            Opcode::SetViewportTransform => (4, 0),
            Opcode::SetUniformBuffer | Opcode::SetResourceTexture => (1, 1),
            Opcode::ClearColorFramebuffer => (5, 0),
            Opcode::EnableStereo => (1, 0),
        };
        Arity { params, resources }
    }
}

/// A recorded operation with its operands inline.
///
/// `None` in a binding command means "unbind this slot".
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Draw {
        primitive: Primitive,
        vertex_count: u32,
        start_vertex: u32,
    },
    DrawIndexed {
        primitive: Primitive,
        index_count: u32,
        start_index: u32,
    },
    DrawInstanced {
        instance_count: u32,
        primitive: Primitive,
        vertex_count: u32,
        start_vertex: u32,
        start_instance: u32,
    },
    DrawIndexedInstanced {
        instance_count: u32,
        primitive: Primitive,
        index_count: u32,
        start_index: u32,
        start_instance: u32,
    },
    SetPipeline(Option<PipelineRef>),
    SetFramebuffer(Option<FramebufferRef>),
    SetViewportTransform(Viewport),
    SetUniformBuffer {
        slot: u32,
        buffer: Option<BufferRef>,
    },
    SetResourceTexture {
        slot: u32,
        texture: Option<TextureRef>,
    },
    ClearColorFramebuffer {
        targets: FramebufferMask,
        color: ColorRgba,
    },
    EnableStereo(bool),
}

impl Command {
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Draw { .. } => Opcode::Draw,
            Command::DrawIndexed { .. } => Opcode::DrawIndexed,
            Command::DrawInstanced { .. } => Opcode::DrawInstanced,
            Command::DrawIndexedInstanced { .. } => Opcode::DrawIndexedInstanced,
            Command::SetPipeline(_) => Opcode::SetPipeline,
            Command::SetFramebuffer(_) => Opcode::SetFramebuffer,
            Command::SetViewportTransform(_) => Opcode::SetViewportTransform,
            Command::SetUniformBuffer { .. } => Opcode::SetUniformBuffer,
            Command::SetResourceTexture { .. } => Opcode::SetResourceTexture,
            Command::ClearColorFramebuffer { .. } => Opcode::ClearColorFramebuffer,
            Command::EnableStereo(_) => Opcode::EnableStereo,
        }
    }

    /// Scalar operands in stream push order.
    pub fn params(&self) -> Vec<Param> {
        use Param as P;
        match *self {
            Command::Draw { primitive, vertex_count, start_vertex } => {
                vec![P::Uint(start_vertex), P::Uint(vertex_count), P::Primitive(primitive)]
            }
            Command::DrawIndexed { primitive, index_count, start_index } => {
                vec![P::Uint(start_index), P::Uint(index_count), P::Primitive(primitive)]
            }
            Command::DrawInstanced {
                instance_count,
                primitive,
                vertex_count,
                start_vertex,
                start_instance,
            } => vec![
                P::Uint(start_instance),
                P::Uint(start_vertex),
                P::Uint(vertex_count),
                P::Primitive(primitive),
                P::Uint(instance_count),
            ],
            Command::DrawIndexedInstanced {
                instance_count,
                primitive,
                index_count,
                start_index,
                start_instance,
            } => vec![
                P::Uint(start_instance),
                P::Uint(start_index),
                P::Uint(index_count),
                P::Primitive(primitive),
                P::Uint(instance_count),
            ],
            Command::SetPipeline(_) | Command::SetFramebuffer(_) => Vec::new(),
            Command::SetViewportTransform(vp) => {
                vec![P::Int(vp.x), P::Int(vp.y), P::Int(vp.width), P::Int(vp.height)]
            }
            Command::SetUniformBuffer { slot, .. } | Command::SetResourceTexture { slot, .. } => {
                vec![P::Uint(slot)]
            }
            Command::ClearColorFramebuffer { targets, color } => vec![
                P::Uint(targets.bits()),
                P::Float(color.r),
                P::Float(color.g),
                P::Float(color.b),
                P::Float(color.a),
            ],
            Command::EnableStereo(enabled) => vec![P::Bool(enabled)],
        }
    }

    /// Object references in stream push order.
    pub fn resources(&self) -> Vec<Option<Resource>> {
        match self {
            Command::SetPipeline(p) => vec![p.clone().map(Resource::Pipeline)],
            Command::SetFramebuffer(fb) => vec![fb.clone().map(Resource::Framebuffer)],
            Command::SetUniformBuffer { buffer, .. } => vec![buffer.clone().map(Resource::Buffer)],
            Command::SetResourceTexture { texture, .. } => {
                vec![texture.clone().map(Resource::Texture)]
            }
            _ => Vec::new(),
        }
    }

    /// True for the four draw opcodes.
    pub fn is_draw(&self) -> bool {
        matches!(
            self.opcode(),
            Opcode::Draw | Opcode::DrawIndexed | Opcode::DrawInstanced | Opcode::DrawIndexedInstanced
        )
    }
}
