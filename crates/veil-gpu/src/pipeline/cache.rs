use super::PipelineRef;

/// Lazily built pipeline slot.
///
/// Starts `Unbuilt`; the first [`get_or_build`](Self::get_or_build) runs the
/// builder and every later call returns the same pipeline. There is no way back
/// to `Unbuilt`: a different shader or state needs a new owner.
#[derive(Debug, Clone, Default)]
pub enum CachedPipeline {
    #[default]
    Unbuilt,
    Built(PipelineRef),
}

impl CachedPipeline {
    pub fn get_or_build(&mut self, build: impl FnOnce() -> PipelineRef) -> PipelineRef {
        match self {
            CachedPipeline::Built(p) => p.clone(),
            CachedPipeline::Unbuilt => {
                let p = build();
                *self = CachedPipeline::Built(p.clone());
                p
            }
        }
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        matches!(self, CachedPipeline::Built(_))
    }

    #[inline]
    pub fn get(&self) -> Option<&PipelineRef> {
        match self {
            CachedPipeline::Built(p) => Some(p),
            CachedPipeline::Unbuilt => None,
        }
    }
}
