/// Stencil test configuration, applied to both faces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StencilTest {
    pub reference: u32,
    pub read_mask: u32,
    pub write_mask: u32,
    pub face: wgpu::StencilFaceState,
}

impl StencilTest {
    /// Passes where the stored stencil value differs from `reference`; leaves
    /// the stencil buffer untouched.
    pub fn not_equal_keep(reference: u32, read_mask: u32) -> Self {
        Self {
            reference,
            read_mask,
            write_mask: 0xFF,
            face: wgpu::StencilFaceState {
                compare: wgpu::CompareFunction::NotEqual,
                fail_op: wgpu::StencilOperation::Keep,
                depth_fail_op: wgpu::StencilOperation::Keep,
                pass_op: wgpu::StencilOperation::Keep,
            },
        }
    }

    pub fn to_wgpu(self) -> wgpu::StencilState {
        wgpu::StencilState {
            front: self.face,
            back: self.face,
            read_mask: self.read_mask,
            write_mask: self.write_mask,
        }
    }
}

/// Fixed-function state bundled into a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    stencil: Option<StencilTest>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the stencil test; `write_mask` overrides the test's own.
    pub fn set_stencil_test(&mut self, enabled: bool, write_mask: u32, test: StencilTest) {
        self.stencil = enabled.then_some(StencilTest { write_mask, ..test });
    }

    #[inline]
    pub fn stencil_test(&self) -> Option<&StencilTest> {
        self.stencil.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stencil_defaults_off() {
        assert!(State::new().stencil_test().is_none());
    }

    #[test]
    fn set_stencil_test_applies_write_mask() {
        let mut state = State::new();
        state.set_stencil_test(true, 0x0F, StencilTest::not_equal_keep(0, 0xFF));
        let s = state.stencil_test().copied().unwrap();
        assert_eq!(s.write_mask, 0x0F);
        assert_eq!(s.face.compare, wgpu::CompareFunction::NotEqual);
        assert_eq!(s.to_wgpu().read_mask, 0xFF);

        state.set_stencil_test(false, 0xFF, s);
        assert!(state.stencil_test().is_none());
    }
}
