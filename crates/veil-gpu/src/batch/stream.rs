use crate::coords::{ColorRgba, Viewport};
use crate::resource::{FramebufferMask, Resource, ResourceKind};

use super::{Command, Opcode, Param, Primitive};

/// Flat, append-only sequence of scalar operands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamStack {
    values: Vec<Param>,
}

impl ParamStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: Param) {
        self.values.push(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Param] {
        &self.values
    }

    #[inline]
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// FIFO reader starting at the first pushed value.
    pub fn cursor(&self) -> ParamCursor<'_> {
        ParamCursor {
            values: &self.values,
            pos: 0,
        }
    }
}

/// Consumes a [`ParamStack`] front to back.
#[derive(Debug, Clone)]
pub struct ParamCursor<'a> {
    values: &'a [Param],
    pos: usize,
}

impl<'a> ParamCursor<'a> {
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len() - self.pos
    }
}

impl Iterator for ParamCursor<'_> {
    type Item = Param;

    fn next(&mut self) -> Option<Param> {
        let v = self.values.get(self.pos).copied()?;
        self.pos += 1;
        Some(v)
    }
}

/// Flat sequence of object references; `None` entries mean "unbind".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTable {
    entries: Vec<Option<Resource>>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, entry: Option<Resource>) {
        self.entries.push(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Option<Resource>> {
        self.entries.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Option<Resource>> {
        self.entries.iter()
    }

    /// Releases every reference.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Why a flat stream could not be turned back into commands.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamError {
    #[error("{opcode:?}: param stack exhausted at operand {index}")]
    MissingParam { opcode: Opcode, index: usize },
    #[error("{opcode:?}: operand {index} expected {expected}, found {found:?}")]
    ParamType {
        opcode: Opcode,
        index: usize,
        expected: &'static str,
        found: Param,
    },
    #[error("{opcode:?}: resource table exhausted")]
    MissingResource { opcode: Opcode },
    #[error("{opcode:?}: expected a {expected:?} reference, found {found:?}")]
    ResourceKind {
        opcode: Opcode,
        expected: ResourceKind,
        found: ResourceKind,
    },
    #[error("{0} params left over after the last opcode")]
    TrailingParams(usize),
    #[error("{0} resources left over after the last opcode")]
    TrailingResources(usize),
}

/// The three-stream layout: opcodes, with operands kept apart and consumed in
/// push order according to [`Opcode::arity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedBatch {
    pub opcodes: Vec<Opcode>,
    pub params: ParamStack,
    pub resources: ResourceTable,
}

impl EncodedBatch {
    pub fn from_commands(commands: &[Command]) -> Self {
        let mut out = Self::default();
        for cmd in commands {
            out.opcodes.push(cmd.opcode());
            for p in cmd.params() {
                out.params.push(p);
            }
            for r in cmd.resources() {
                out.resources.push(r);
            }
        }
        out
    }

    /// Rebuilds typed commands, checking every operand against the opcode's
    /// arity and expected types.
    pub fn decode(&self) -> Result<Vec<Command>, StreamError> {
        let mut reader = Reader {
            params: self.params.cursor(),
            resources: self.resources.iter(),
            opcode: Opcode::Draw,
            index: 0,
        };

        let mut commands = Vec::with_capacity(self.opcodes.len());
        for &opcode in &self.opcodes {
            reader.opcode = opcode;
            reader.index = 0;
            commands.push(reader.command()?);
        }

        let extra = reader.params.remaining();
        if extra > 0 {
            return Err(StreamError::TrailingParams(extra));
        }
        let extra = reader.resources.len();
        if extra > 0 {
            return Err(StreamError::TrailingResources(extra));
        }
        Ok(commands)
    }
}

struct Reader<'a> {
    params: ParamCursor<'a>,
    resources: std::slice::Iter<'a, Option<Resource>>,
    opcode: Opcode,
    index: usize,
}

impl Reader<'_> {
    fn param(&mut self) -> Result<Param, StreamError> {
        let p = self.params.next().ok_or(StreamError::MissingParam {
            opcode: self.opcode,
            index: self.index,
        })?;
        self.index += 1;
        Ok(p)
    }

    fn mismatch(&self, expected: &'static str, found: Param) -> StreamError {
        StreamError::ParamType {
            opcode: self.opcode,
            index: self.index - 1,
            expected,
            found,
        }
    }

    fn uint(&mut self) -> Result<u32, StreamError> {
        match self.param()? {
            Param::Uint(v) => Ok(v),
            other => Err(self.mismatch("uint", other)),
        }
    }

    fn int(&mut self) -> Result<i32, StreamError> {
        match self.param()? {
            Param::Int(v) => Ok(v),
            other => Err(self.mismatch("int", other)),
        }
    }

    fn float(&mut self) -> Result<f32, StreamError> {
        match self.param()? {
            Param::Float(v) => Ok(v),
            other => Err(self.mismatch("float", other)),
        }
    }

    fn boolean(&mut self) -> Result<bool, StreamError> {
        match self.param()? {
            Param::Bool(v) => Ok(v),
            other => Err(self.mismatch("bool", other)),
        }
    }

    fn primitive(&mut self) -> Result<Primitive, StreamError> {
        match self.param()? {
            Param::Primitive(v) => Ok(v),
            other => Err(self.mismatch("primitive", other)),
        }
    }

    fn resource(&mut self, expected: ResourceKind) -> Result<Option<Resource>, StreamError> {
        let entry = self
            .resources
            .next()
            .ok_or(StreamError::MissingResource { opcode: self.opcode })?;
        match entry {
            Some(r) if r.kind() != expected => Err(StreamError::ResourceKind {
                opcode: self.opcode,
                expected,
                found: r.kind(),
            }),
            other => Ok(other.clone()),
        }
    }

    fn command(&mut self) -> Result<Command, StreamError> {
        let cmd = match self.opcode {
            Opcode::Draw => {
                let start_vertex = self.uint()?;
                let vertex_count = self.uint()?;
                let primitive = self.primitive()?;
                Command::Draw {
                    primitive,
                    vertex_count,
                    start_vertex,
                }
            }
            Opcode::DrawIndexed => {
                let start_index = self.uint()?;
                let index_count = self.uint()?;
                let primitive = self.primitive()?;
                Command::DrawIndexed {
                    primitive,
                    index_count,
                    start_index,
                }
            }
            Opcode::DrawInstanced => {
                let start_instance = self.uint()?;
                let start_vertex = self.uint()?;
                let vertex_count = self.uint()?;
                let primitive = self.primitive()?;
                let instance_count = self.uint()?;
                Command::DrawInstanced {
                    instance_count,
                    primitive,
                    vertex_count,
                    start_vertex,
                    start_instance,
                }
            }
            Opcode::DrawIndexedInstanced => {
                let start_instance = self.uint()?;
                let start_index = self.uint()?;
                let index_count = self.uint()?;
                let primitive = self.primitive()?;
                let instance_count = self.uint()?;
                Command::DrawIndexedInstanced {
                    instance_count,
                    primitive,
                    index_count,
                    start_index,
                    start_instance,
                }
            }
            Opcode::SetPipeline => match self.resource(ResourceKind::Pipeline)? {
                Some(Resource::Pipeline(p)) => Command::SetPipeline(Some(p)),
                _ => Command::SetPipeline(None),
            },
            Opcode::SetFramebuffer => match self.resource(ResourceKind::Framebuffer)? {
                Some(Resource::Framebuffer(fb)) => Command::SetFramebuffer(Some(fb)),
                _ => Command::SetFramebuffer(None),
            },
            Opcode::SetViewportTransform => {
                let x = self.int()?;
                let y = self.int()?;
                let width = self.int()?;
                let height = self.int()?;
                Command::SetViewportTransform(Viewport::new(x, y, width, height))
            }
            Opcode::SetUniformBuffer => {
                let slot = self.uint()?;
                let buffer = match self.resource(ResourceKind::Buffer)? {
                    Some(Resource::Buffer(b)) => Some(b),
                    _ => None,
                };
                Command::SetUniformBuffer { slot, buffer }
            }
            Opcode::SetResourceTexture => {
                let slot = self.uint()?;
                let texture = match self.resource(ResourceKind::Texture)? {
                    Some(Resource::Texture(t)) => Some(t),
                    _ => None,
                };
                Command::SetResourceTexture { slot, texture }
            }
            Opcode::ClearColorFramebuffer => {
                let targets = FramebufferMask(self.uint()?);
                let r = self.float()?;
                let g = self.float()?;
                let b = self.float()?;
                let a = self.float()?;
                Command::ClearColorFramebuffer {
                    targets,
                    color: ColorRgba::new(r, g, b, a),
                }
            }
            Opcode::EnableStereo => Command::EnableStereo(self.boolean()?),
        };
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Batch;
    use crate::resource::{Framebuffer, Sampler, Texture};

    #[test]
    fn cursor_is_fifo() {
        let mut stack = ParamStack::new();
        stack.push(Param::Uint(1));
        stack.push(Param::Float(2.0));
        let mut c = stack.cursor();
        assert_eq!(c.next(), Some(Param::Uint(1)));
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.next(), Some(Param::Float(2.0)));
        assert_eq!(c.next(), None);
    }

    #[test]
    fn operand_counts_follow_arity() {
        let tex = Texture::create_2d(wgpu::TextureFormat::Rgba8Unorm, 1, 1, Sampler::default());
        let mut b = Batch::new();
        b.draw(Primitive::Triangles, 3, 0);
        b.draw_instanced(2, Primitive::Triangles, 3, 0, 0);
        b.set_resource_texture(0, Some(&tex));
        b.set_framebuffer(None);
        b.enable_stereo(true);

        for cmd in &b {
            let arity = cmd.opcode().arity();
            assert_eq!(cmd.params().len(), arity.params, "{:?}", cmd.opcode());
            assert_eq!(cmd.resources().len(), arity.resources, "{:?}", cmd.opcode());
        }
        let encoded = b.encode();
        assert_eq!(encoded.opcodes.len(), 5);
        assert_eq!(encoded.params.len(), 3 + 5 + 1 + 1);
        assert_eq!(encoded.resources.len(), 2);
    }

    #[test]
    fn decode_restores_commands_and_identity() {
        let fb = Framebuffer::create();
        let mut b = Batch::new();
        b.set_framebuffer(Some(&fb));
        b.set_viewport_transform(Viewport::new(1, 2, 3, 4));
        b.clear_color_framebuffer(FramebufferMask::COLOR0, ColorRgba::new(0.1, 0.2, 0.3, 0.4));
        b.set_uniform_buffer(2, None);

        let decoded = b.encode().decode().unwrap();
        assert_eq!(decoded.as_slice(), b.commands());
    }

    #[test]
    fn dropped_param_is_reported() {
        let mut b = Batch::new();
        b.draw(Primitive::Triangles, 3, 0);
        let mut encoded = b.encode();
        let mut short = ParamStack::new();
        for p in encoded.params.as_slice().iter().take(2) {
            short.push(*p);
        }
        encoded.params = short;

        assert_eq!(
            encoded.decode(),
            Err(StreamError::MissingParam {
                opcode: Opcode::Draw,
                index: 2
            })
        );
    }

    #[test]
    fn swapped_params_are_reported() {
        let mut encoded = EncodedBatch::default();
        encoded.opcodes.push(Opcode::Draw);
        encoded.params.push(Param::Primitive(Primitive::Triangles));
        encoded.params.push(Param::Uint(3));
        encoded.params.push(Param::Uint(0));

        assert!(matches!(
            encoded.decode(),
            Err(StreamError::ParamType { index: 0, expected: "uint", .. })
        ));
    }

    #[test]
    fn wrong_resource_kind_is_reported() {
        let tex = Texture::create_2d(wgpu::TextureFormat::Rgba8Unorm, 1, 1, Sampler::default());
        let mut encoded = EncodedBatch::default();
        encoded.opcodes.push(Opcode::SetFramebuffer);
        encoded.resources.push(Some(Resource::Texture(tex)));

        assert_eq!(
            encoded.decode(),
            Err(StreamError::ResourceKind {
                opcode: Opcode::SetFramebuffer,
                expected: ResourceKind::Framebuffer,
                found: ResourceKind::Texture,
            })
        );
    }

    #[test]
    fn leftover_operands_are_reported() {
        let mut b = Batch::new();
        b.enable_stereo(false);
        let mut encoded = b.encode();
        encoded.params.push(Param::Bool(true));
        assert_eq!(encoded.decode(), Err(StreamError::TrailingParams(1)));
    }
}
