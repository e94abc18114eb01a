use std::borrow::Cow;

/// One shader stage as source text. Compilation belongs to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    stage: wgpu::ShaderStages,
    name: Cow<'static, str>,
    source: Cow<'static, str>,
}

impl Shader {
    pub fn create_vertex(name: impl Into<Cow<'static, str>>, source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage: wgpu::ShaderStages::VERTEX,
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn create_pixel(name: impl Into<Cow<'static, str>>, source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage: wgpu::ShaderStages::FRAGMENT,
            name: name.into(),
            source: source.into(),
        }
    }

    #[inline]
    pub fn stage(&self) -> wgpu::ShaderStages {
        self.stage
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// What a named shader input binds to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BindingKind {
    UniformBuffer,
    Texture,
}

/// Maps a named shader input to a batch slot index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotBinding {
    pub name: Cow<'static, str>,
    pub slot: u32,
    pub kind: BindingKind,
}

impl SlotBinding {
    pub fn uniform_buffer(name: impl Into<Cow<'static, str>>, slot: u32) -> Self {
        Self {
            name: name.into(),
            slot,
            kind: BindingKind::UniformBuffer,
        }
    }

    pub fn texture(name: impl Into<Cow<'static, str>>, slot: u32) -> Self {
        Self {
            name: name.into(),
            slot,
            kind: BindingKind::Texture,
        }
    }
}

/// Vertex + pixel shader pair with its declared slot bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    vertex: Shader,
    pixel: Shader,
    bindings: Vec<SlotBinding>,
}

impl Program {
    pub fn create(vertex: Shader, pixel: Shader) -> Self {
        debug_assert_eq!(vertex.stage(), wgpu::ShaderStages::VERTEX);
        debug_assert_eq!(pixel.stage(), wgpu::ShaderStages::FRAGMENT);
        Self {
            vertex,
            pixel,
            bindings: Vec::new(),
        }
    }

    /// Declares the slot bindings. A later binding with the same name and kind
    /// replaces the earlier one.
    pub fn make_program(mut self, bindings: impl IntoIterator<Item = SlotBinding>) -> Self {
        for b in bindings {
            self.bindings.retain(|e| !(e.name == b.name && e.kind == b.kind));
            self.bindings.push(b);
        }
        self
    }

    #[inline]
    pub fn vertex(&self) -> &Shader {
        &self.vertex
    }

    #[inline]
    pub fn pixel(&self) -> &Shader {
        &self.pixel
    }

    #[inline]
    pub fn bindings(&self) -> &[SlotBinding] {
        &self.bindings
    }

    /// Slot assigned to the input called `name`, if declared.
    pub fn slot_of(&self, name: &str, kind: BindingKind) -> Option<u32> {
        self.bindings
            .iter()
            .find(|b| b.name == name && b.kind == kind)
            .map(|b| b.slot)
    }
}
