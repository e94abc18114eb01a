use veil_gpu::context::Context;
use veil_gpu::coords::Viewport;

/// Camera frustum of the frame being rendered.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewFrustum {
    pub position: [f32; 3],
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in radians.
    pub field_of_view: f32,
    pub aspect_ratio: f32,
}

impl Default for ViewFrustum {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            near: 0.1,
            far: 1000.0,
            field_of_view: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 1.0,
        }
    }
}

/// Per-frame arguments the scheduler hands to every task.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RenderArgs {
    pub viewport: Viewport,
    pub view_frustum: Option<ViewFrustum>,
}

impl RenderArgs {
    pub fn new(viewport: Viewport, view_frustum: ViewFrustum) -> Self {
        Self {
            viewport,
            view_frustum: Some(view_frustum),
        }
    }

    #[inline]
    pub fn has_view_frustum(&self) -> bool {
        self.view_frustum.is_some()
    }
}

/// Everything a task needs to record and submit work.
///
/// `args` is `None` outside of a frame.
pub struct RenderContext {
    pub args: Option<RenderArgs>,
    pub gpu: Context,
}

impl RenderContext {
    pub fn new(gpu: Context) -> Self {
        Self { args: None, gpu }
    }

    pub fn with_args(gpu: Context, args: RenderArgs) -> Self {
        Self {
            args: Some(args),
            gpu,
        }
    }

    /// Frame arguments, if a frame with an active frustum is in progress.
    pub fn frame_args(&self) -> Option<RenderArgs> {
        self.args.filter(RenderArgs::has_view_frustum)
    }
}
