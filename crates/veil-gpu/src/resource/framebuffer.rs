use std::ops::BitOr;

use super::{Handle, Texture, TextureRef};

pub type FramebufferRef = Handle<Framebuffer>;

/// Number of color attachment slots.
pub const MAX_RENDER_BUFFERS: usize = 8;

/// Selects which attachments a clear touches.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct FramebufferMask(pub u32);

impl FramebufferMask {
    pub const COLOR0: Self = Self(1 << 0);
    pub const COLOR1: Self = Self(1 << 1);
    pub const COLOR2: Self = Self(1 << 2);
    pub const COLOR3: Self = Self(1 << 3);
    pub const DEPTH: Self = Self(1 << 30);
    pub const STENCIL: Self = Self(1 << 31);

    /// Mask for color slot `slot`.
    #[inline]
    pub const fn color(slot: u32) -> Self {
        Self(1 << slot)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for FramebufferMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Render target: up to [`MAX_RENDER_BUFFERS`] color images plus an optional
/// depth-stencil image, all of the same extent.
///
/// Color buffers are owned; the depth-stencil image is usually borrowed from
/// another framebuffer and is never resized from here.
#[derive(Debug, Clone, Default)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    samples: u32,
    render_buffers: [Option<TextureRef>; MAX_RENDER_BUFFERS],
    depth_stencil: Option<(TextureRef, wgpu::TextureFormat)>,
}

impl Framebuffer {
    /// Empty framebuffer; the first attachment fixes its extent.
    pub fn create() -> FramebufferRef {
        Handle::new(Self::default())
    }

    /// Framebuffer with a single color buffer in slot 0.
    pub fn create_render_target(
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        samples: u32,
    ) -> FramebufferRef {
        let mut fb = Self::default();
        fb.set_render_buffer(0, Texture::create_render_target(format, width, height, samples));
        Handle::new(fb)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn num_samples(&self) -> u32 {
        self.samples
    }

    fn is_empty(&self) -> bool {
        self.depth_stencil.is_none() && self.render_buffers.iter().all(Option::is_none)
    }

    fn accepts(&mut self, texture: &Texture) -> bool {
        if self.is_empty() {
            self.width = texture.width();
            self.height = texture.height();
            self.samples = texture.num_samples();
            return true;
        }
        (texture.width(), texture.height()) == (self.width, self.height)
    }

    /// Attaches `texture` as color buffer `slot`.
    ///
    /// Returns false when the slot is out of range or the extent does not match.
    pub fn set_render_buffer(&mut self, slot: usize, texture: TextureRef) -> bool {
        if slot >= MAX_RENDER_BUFFERS {
            return false;
        }
        if !self.accepts(&texture.borrow()) {
            log::warn!(
                "framebuffer {}x{}: render buffer {} has mismatched size",
                self.width,
                self.height,
                slot
            );
            return false;
        }
        self.render_buffers[slot] = Some(texture);
        true
    }

    #[inline]
    pub fn render_buffer(&self, slot: usize) -> Option<&TextureRef> {
        self.render_buffers.get(slot).and_then(Option::as_ref)
    }

    /// Number of attached color buffers.
    pub fn render_buffer_count(&self) -> usize {
        self.render_buffers.iter().flatten().count()
    }

    /// Attaches a (typically shared) depth-stencil image.
    pub fn set_depth_stencil_buffer(&mut self, texture: TextureRef, format: wgpu::TextureFormat) -> bool {
        if !self.accepts(&texture.borrow()) {
            log::warn!(
                "framebuffer {}x{}: depth-stencil buffer has mismatched size",
                self.width,
                self.height
            );
            return false;
        }
        self.depth_stencil = Some((texture, format));
        true
    }

    #[inline]
    pub fn has_depth_stencil(&self) -> bool {
        self.depth_stencil.is_some()
    }

    #[inline]
    pub fn depth_stencil_buffer(&self) -> Option<&TextureRef> {
        self.depth_stencil.as_ref().map(|(t, _)| t)
    }

    #[inline]
    pub fn depth_stencil_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth_stencil.as_ref().map(|(_, f)| *f)
    }

    /// Resizes all owned color buffers in place.
    ///
    /// A depth-stencil attachment whose extent no longer matches is detached;
    /// callers sharing a depth buffer must reattach the right one afterwards.
    pub fn resize(&mut self, width: u32, height: u32, samples: u32) {
        let samples = samples.max(1);
        if (self.width, self.height, self.samples) == (width, height, samples) {
            return;
        }
        self.width = width;
        self.height = height;
        self.samples = samples;

        for texture in self.render_buffers.iter().flatten() {
            texture.borrow_mut().resize(width, height, samples);
        }

        let stale = self.depth_stencil.as_ref().is_some_and(|(t, _)| {
            let t = t.borrow();
            (t.width(), t.height()) != (width, height)
        });
        if stale {
            log::debug!("framebuffer resized to {width}x{height}; depth-stencil detached");
            self.depth_stencil = None;
        }
    }
}
