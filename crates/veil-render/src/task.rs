use anyhow::Result;

use crate::RenderContext;

/// A unit of render-graph work.
///
/// `configure` may be called any number of times between runs and takes
/// effect on the next `run`. All task state lives in the implementor and is
/// only touched from the render thread.
pub trait Task {
    type Config;
    type Input;
    type Output;

    fn configure(&mut self, config: &Self::Config);

    fn run(&mut self, ctx: &mut RenderContext, input: Self::Input) -> Result<Self::Output>;
}
