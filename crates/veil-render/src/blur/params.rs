use bytemuck::{Pod, Zeroable};

use veil_gpu::resource::{BufferRef, BufferView};

/// Taps per 1D pass.
pub const BLUR_NUM_SAMPLES: f32 = 7.0;

/// GPU layout of the blur parameters.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BlurUniform {
    /// `(width, height, 1 / width, 1 / height)`
    pub resolution_info: [f32; 4],
    /// `(scale, scale / BLUR_NUM_SAMPLES, 0, 0)`
    pub filter_info: [f32; 4],
}

impl Default for BlurUniform {
    fn default() -> Self {
        Self {
            resolution_info: [0.0; 4],
            filter_info: [1.0, 1.0 / BLUR_NUM_SAMPLES, 0.0, 0.0],
        }
    }
}

/// Blur parameters mirrored into a uniform buffer.
///
/// Setters compare against the current value first and skip the write when
/// nothing changed, so an idle frame costs no buffer upload.
#[derive(Debug, Clone)]
pub struct BlurParams {
    view: BufferView<BlurUniform>,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self::new()
    }
}

impl BlurParams {
    pub fn new() -> Self {
        Self {
            view: BufferView::new(&BlurUniform::default()),
        }
    }

    /// Buffer to bind at [`BLUR_PARAMS_SLOT`](super::BLUR_PARAMS_SLOT).
    #[inline]
    pub fn buffer(&self) -> &BufferRef {
        self.view.buffer()
    }

    #[inline]
    pub fn get(&self) -> BlurUniform {
        self.view.get()
    }

    pub fn set_width_height(&self, width: i32, height: i32) {
        let res = self.get().resolution_info;
        let (w, h) = (width as f32, height as f32);
        if w == res[0] && h == res[1] {
            return;
        }
        self.view.edit(|p| p.resolution_info = [w, h, 1.0 / w, 1.0 / h]);
    }

    /// Sets the radius scale and the matching per-sample increment in one write.
    pub fn set_filter_radius_scale(&self, scale: f32) {
        if scale == self.get().filter_info[0] {
            return;
        }
        self.view.edit(|p| {
            p.filter_info[0] = scale;
            p.filter_info[1] = scale / BLUR_NUM_SAMPLES;
        });
    }

    #[inline]
    pub fn filter_radius_scale(&self) -> f32 {
        self.get().filter_info[0]
    }

    #[inline]
    pub fn filter_increment(&self) -> f32 {
        self.get().filter_info[1]
    }
}
