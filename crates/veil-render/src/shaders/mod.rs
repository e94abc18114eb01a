//! WGSL sources for the built-in tasks.
//!
//! Sources are embedded verbatim; the backend compiles them when it first
//! sees a pipeline that uses them.

use veil_gpu::pipeline::Shader;

/// Vertex shader emitting a full-screen quad (4-vertex triangle strip) with
/// texture coordinates at `@location(0)`.
pub fn draw_unit_quad_texcoord_vs() -> Shader {
    Shader::create_vertex(
        "draw_unit_quad_texcoord",
        include_str!("draw_unit_quad_texcoord.wgsl"),
    )
}

pub(crate) fn blur_gaussian_v_ps() -> Shader {
    Shader::create_pixel("blur_gaussian_v", include_str!("blur_gaussian_v.wgsl"))
}

pub(crate) fn blur_gaussian_h_ps() -> Shader {
    Shader::create_pixel("blur_gaussian_h", include_str!("blur_gaussian_h.wgsl"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_shaders_declare_the_named_inputs() {
        for ps in [blur_gaussian_v_ps(), blur_gaussian_h_ps()] {
            assert!(ps.source().contains("blurParamsBuffer"), "{}", ps.name());
            assert!(ps.source().contains("sourceMap"), "{}", ps.name());
            assert!(ps.source().contains("fs_main"), "{}", ps.name());
        }
    }

    #[test]
    fn quad_vs_is_a_vertex_stage() {
        let vs = draw_unit_quad_texcoord_vs();
        assert_eq!(vs.stage(), wgpu::ShaderStages::VERTEX);
        assert!(vs.source().contains("vs_main"));
    }
}
