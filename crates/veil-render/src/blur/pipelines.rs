use veil_gpu::pipeline::{CachedPipeline, Pipeline, PipelineRef, Program, Shader, SlotBinding, State, StencilTest};

use super::{BLUR_PARAMS_SLOT, BLUR_SOURCE_SLOT};
use crate::shaders;

/// The vertical and horizontal pass pipelines, built on first use and kept
/// for the owning task's lifetime.
#[derive(Debug, Clone, Default)]
pub struct BlurPipelines {
    vertical: CachedPipeline,
    horizontal: CachedPipeline,
}

impl BlurPipelines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertical(&mut self) -> PipelineRef {
        self.vertical
            .get_or_build(|| build("vertical", shaders::blur_gaussian_v_ps()))
    }

    pub fn horizontal(&mut self) -> PipelineRef {
        self.horizontal
            .get_or_build(|| build("horizontal", shaders::blur_gaussian_h_ps()))
    }

    #[inline]
    pub fn is_vertical_built(&self) -> bool {
        self.vertical.is_built()
    }

    #[inline]
    pub fn is_horizontal_built(&self) -> bool {
        self.horizontal.is_built()
    }
}

fn build(pass: &str, pixel: Shader) -> PipelineRef {
    let program = Program::create(shaders::draw_unit_quad_texcoord_vs(), pixel).make_program([
        SlotBinding::uniform_buffer("blurParamsBuffer", BLUR_PARAMS_SLOT),
        SlotBinding::texture("sourceMap", BLUR_SOURCE_SLOT),
    ]);

    // Only blur where something was drawn: background pixels keep stencil 0.
    let mut state = State::new();
    state.set_stencil_test(true, 0xFF, StencilTest::not_equal_keep(0, 0xFF));

    log::debug!("blur: built {pass} pipeline");
    Pipeline::create(program, state)
}
