//! Two-pass separable Gaussian blur.
//!
//! A 2D Gaussian of radius k costs O(k²) taps per pixel; the kernel is
//! separable, so a vertical 1D pass into an intermediate target followed by a
//! horizontal 1D pass back into the source gives the same image in O(2k).

mod gaussian;
mod params;
mod pipelines;

pub use gaussian::{BlurConfig, BlurGaussian, BlurringResources};
pub use params::{BlurParams, BlurUniform, BLUR_NUM_SAMPLES};
pub use pipelines::BlurPipelines;

/// Uniform buffer slot of [`BlurParams`].
pub const BLUR_PARAMS_SLOT: u32 = 0;
/// Texture slot of the pass input.
pub const BLUR_SOURCE_SLOT: u32 = 0;
