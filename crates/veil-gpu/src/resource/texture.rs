use super::Handle;

pub type TextureRef = Handle<Texture>;

/// Sampling state a texture is created with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Sampler {
    pub min_filter: wgpu::FilterMode,
    pub mag_filter: wgpu::FilterMode,
    pub mip_filter: wgpu::FilterMode,
}

impl Sampler {
    pub const MIN_MAG_POINT: Self = Self {
        min_filter: wgpu::FilterMode::Nearest,
        mag_filter: wgpu::FilterMode::Nearest,
        mip_filter: wgpu::FilterMode::Nearest,
    };

    /// Bilinear within a level, nearest between levels.
    pub const MIN_MAG_LINEAR_MIP_POINT: Self = Self {
        min_filter: wgpu::FilterMode::Linear,
        mag_filter: wgpu::FilterMode::Linear,
        mip_filter: wgpu::FilterMode::Nearest,
    };
}

impl Default for Sampler {
    fn default() -> Self {
        Self::MIN_MAG_POINT
    }
}

/// Description of a 2D texture the backend allocates on first use.
///
/// Resizing keeps the identity of the texture; the backend reallocates the
/// device storage behind it when it sees a new `stamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    samples: u32,
    sampler: Sampler,
    stamp: u64,
}

impl Texture {
    pub fn create_2d(format: wgpu::TextureFormat, width: u32, height: u32, sampler: Sampler) -> TextureRef {
        Self::create_2d_multisample(format, width, height, 1, sampler)
    }

    /// 2D texture with `samples` per texel, sampled through `sampler`.
    pub fn create_2d_multisample(
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        samples: u32,
        sampler: Sampler,
    ) -> TextureRef {
        Handle::new(Self {
            format,
            width,
            height,
            samples: samples.max(1),
            sampler,
            stamp: 0,
        })
    }

    /// Multisampled render target.
    pub fn create_render_target(format: wgpu::TextureFormat, width: u32, height: u32, samples: u32) -> TextureRef {
        Self::create_2d_multisample(format, width, height, samples, Sampler::default())
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
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
    pub fn num_samples(&self) -> u32 {
        self.samples
    }

    #[inline]
    pub fn sampler(&self) -> Sampler {
        self.sampler
    }

    #[inline]
    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Changes the extent in place. Returns false when nothing changed.
    pub fn resize(&mut self, width: u32, height: u32, samples: u32) -> bool {
        let samples = samples.max(1);
        if (self.width, self.height, self.samples) == (width, height, samples) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.samples = samples;
        self.stamp = self.stamp.wrapping_add(1);
        true
    }
}
