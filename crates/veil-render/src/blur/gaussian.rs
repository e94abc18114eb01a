use anyhow::Result;

use veil_gpu::batch::Primitive;
use veil_gpu::coords::ColorRgba;
use veil_gpu::resource::{Framebuffer, FramebufferMask, FramebufferRef, Handle, Sampler, Texture, TextureRef};

use super::{BlurParams, BlurPipelines, BLUR_PARAMS_SLOT, BLUR_SOURCE_SLOT};
use crate::{RenderContext, Task};

/// User-facing blur options.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BlurConfig {
    /// Multiplier on the tap spacing; larger values blur wider.
    pub filter_scale: f32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self { filter_scale: 1.0 }
    }
}

/// Targets and inputs of one blur invocation.
#[derive(Debug, Clone)]
pub struct BlurringResources {
    pub source_texture: TextureRef,
    pub blurring_framebuffer: FramebufferRef,
    pub blurring_texture: TextureRef,
    pub final_framebuffer: FramebufferRef,
}

/// Separable Gaussian blur applied in place to a framebuffer.
///
/// Owns its parameter buffer, the two pass pipelines and the intermediate
/// framebuffer for its whole lifetime.
#[derive(Debug, Default)]
pub struct BlurGaussian {
    parameters: BlurParams,
    pipelines: BlurPipelines,
    blurred_framebuffer: Option<FramebufferRef>,
}

impl BlurGaussian {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn parameters(&self) -> &BlurParams {
        &self.parameters
    }

    #[inline]
    pub fn pipelines(&self) -> &BlurPipelines {
        &self.pipelines
    }

    /// Intermediate target, once the first run has created it.
    #[inline]
    pub fn blurred_framebuffer(&self) -> Option<&FramebufferRef> {
        self.blurred_framebuffer.as_ref()
    }

    pub fn configure(&mut self, config: &BlurConfig) {
        self.parameters.set_filter_radius_scale(config.filter_scale);
    }

    /// Creates or resizes the intermediate framebuffer to match `source`.
    ///
    /// Returns `None`, touching nothing, when `source` has no color buffer.
    fn update_blurring_resources(&mut self, source: &FramebufferRef) -> Option<BlurringResources> {
        if self.blurred_framebuffer.as_ref().is_some_and(|fb| Handle::ptr_eq(fb, source)) {
            log::debug!("blur: source is the intermediate framebuffer, skipping");
            return None;
        }

        let src = source.borrow();
        let source_texture = src.render_buffer(0)?.clone();

        let blurred = match self.blurred_framebuffer.clone() {
            None => {
                let format = source_texture.borrow().format();
                let target = Texture::create_2d_multisample(
                    format,
                    src.width(),
                    src.height(),
                    src.num_samples(),
                    Sampler::MIN_MAG_LINEAR_MIP_POINT,
                );
                let fb = Framebuffer::create();
                {
                    let mut fb = fb.borrow_mut();
                    fb.set_render_buffer(0, target);
                    if let (Some(depth), Some(fmt)) = (src.depth_stencil_buffer(), src.depth_stencil_format()) {
                        fb.set_depth_stencil_buffer(depth.clone(), fmt);
                    }
                }
                log::debug!(
                    "blur: created {}x{} intermediate framebuffer ({:?})",
                    src.width(),
                    src.height(),
                    format
                );
                self.blurred_framebuffer = Some(fb.clone());
                fb
            }
            Some(fb) => {
                let stale = fb.borrow().size() != src.size();
                if stale {
                    let mut dst = fb.borrow_mut();
                    log::debug!(
                        "blur: resizing intermediate framebuffer {}x{} -> {}x{}",
                        dst.width(),
                        dst.height(),
                        src.width(),
                        src.height()
                    );
                    // Resize may detach the depth-stencil buffer; put the source's back.
                    dst.resize(src.width(), src.height(), src.num_samples());
                    if let (Some(depth), Some(fmt)) = (src.depth_stencil_buffer(), src.depth_stencil_format()) {
                        dst.set_depth_stencil_buffer(depth.clone(), fmt);
                    }
                }
                fb
            }
        };

        let blurring_texture = blurred.borrow().render_buffer(0)?.clone();
        Some(BlurringResources {
            source_texture,
            blurring_framebuffer: blurred,
            blurring_texture,
            final_framebuffer: source.clone(),
        })
    }

    /// Blurs `source` in place.
    ///
    /// Skips the frame (no batch, no resource changes) and returns `Ok(None)`
    /// when there is no source or no active frame; the latter also trips a
    /// debug assertion since the scheduler should never allow it.
    pub fn run(&mut self, ctx: &mut RenderContext, source: Option<&FramebufferRef>) -> Result<Option<FramebufferRef>> {
        debug_assert!(
            ctx.frame_args().is_some(),
            "blur: run without render args or view frustum"
        );
        let Some(args) = ctx.frame_args() else {
            log::debug!("blur: no active frame, skipping");
            return Ok(None);
        };
        let Some(source) = source else {
            log::debug!("blur: no source framebuffer, skipping");
            return Ok(None);
        };

        let Some(res) = self.update_blurring_resources(source) else {
            log::debug!("blur: source framebuffer has no color buffer, skipping");
            return Ok(None);
        };

        self.parameters
            .set_width_height(args.viewport.width, args.viewport.height);

        let blur_v = self.pipelines.vertical();
        let blur_h = self.pipelines.horizontal();
        let params = self.parameters.buffer();

        ctx.gpu.do_in_batch(|batch| {
            batch.enable_stereo(false);
            batch.set_viewport_transform(args.viewport);

            batch.set_uniform_buffer(BLUR_PARAMS_SLOT, Some(params));

            batch.set_framebuffer(Some(&res.blurring_framebuffer));
            batch.clear_color_framebuffer(FramebufferMask::COLOR0, ColorRgba::zero());

            batch.set_pipeline(Some(&blur_v));
            batch.set_resource_texture(BLUR_SOURCE_SLOT, Some(&res.source_texture));
            batch.draw(Primitive::TriangleStrip, 4, 0);

            batch.set_framebuffer(Some(&res.final_framebuffer));
            batch.set_pipeline(Some(&blur_h));
            batch.set_resource_texture(BLUR_SOURCE_SLOT, Some(&res.blurring_texture));
            batch.draw(Primitive::TriangleStrip, 4, 0);

            batch.set_resource_texture(BLUR_SOURCE_SLOT, None);
            batch.set_uniform_buffer(BLUR_PARAMS_SLOT, None);
        })?;

        Ok(Some(res.final_framebuffer))
    }
}

impl Task for BlurGaussian {
    type Config = BlurConfig;
    type Input = Option<FramebufferRef>;
    type Output = Option<FramebufferRef>;

    fn configure(&mut self, config: &BlurConfig) {
        BlurGaussian::configure(self, config);
    }

    fn run(&mut self, ctx: &mut RenderContext, input: Option<FramebufferRef>) -> Result<Option<FramebufferRef>> {
        BlurGaussian::run(self, ctx, input.as_ref())
    }
}
