//! Shader programs, fixed-function state and the immutable pipelines built
//! from them.

mod cache;
mod shader;
mod state;

pub use cache::CachedPipeline;
pub use shader::{BindingKind, Program, Shader, SlotBinding};
pub use state::{State, StencilTest};

use crate::resource::Handle;

pub type PipelineRef = Handle<Pipeline>;

/// Shader program plus fixed-function state. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    program: Program,
    state: State,
}

impl Pipeline {
    pub fn create(program: Program, state: State) -> PipelineRef {
        Handle::new(Self { program, state })
    }

    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }
}
