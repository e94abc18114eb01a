//! Recording contract of `Batch` across arbitrary call sequences.

use veil_gpu::batch::{Batch, Opcode, Primitive};
use veil_gpu::coords::{ColorRgba, Viewport};
use veil_gpu::pipeline::{Pipeline, Program, Shader, State};
use veil_gpu::resource::{Buffer, Framebuffer, FramebufferMask, Handle, Sampler, Texture};

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}

fn record_random(batch: &mut Batch, rng: &mut Lcg, calls: usize) -> Vec<Opcode> {
    let pipeline = Pipeline::create(
        Program::create(Shader::create_vertex("v", ""), Shader::create_pixel("p", "")),
        State::new(),
    );
    let fb = Framebuffer::create_render_target(wgpu::TextureFormat::Rgba8Unorm, 8, 8, 1);
    let tex = Texture::create_2d(wgpu::TextureFormat::Rgba8Unorm, 8, 8, Sampler::default());
    let buf = Handle::new(Buffer::new());

    let mut expected = Vec::with_capacity(calls);
    for _ in 0..calls {
        let n = rng.next();
        let op = Opcode::ALL[(n % Opcode::ALL.len() as u32) as usize];
        let bind = n % 3 != 0;
        match op {
            Opcode::Draw => batch.draw(Primitive::Triangles, n % 100, n % 7),
            Opcode::DrawIndexed => batch.draw_indexed(Primitive::Lines, n % 100, n % 5),
            Opcode::DrawInstanced => batch.draw_instanced(n % 4, Primitive::Points, 3, 0, 1),
            Opcode::DrawIndexedInstanced => {
                batch.draw_indexed_instanced(2, Primitive::TriangleStrip, 6, 0, n % 9)
            }
            Opcode::SetPipeline => batch.set_pipeline(bind.then_some(&pipeline)),
            Opcode::SetFramebuffer => batch.set_framebuffer(bind.then_some(&fb)),
            Opcode::SetViewportTransform => {
                batch.set_viewport_transform(Viewport::from_size((n % 640) as i32, 480))
            }
            Opcode::SetUniformBuffer => batch.set_uniform_buffer(n % 4, bind.then_some(&buf)),
            Opcode::SetResourceTexture => batch.set_resource_texture(n % 4, bind.then_some(&tex)),
            Opcode::ClearColorFramebuffer => {
                batch.clear_color_framebuffer(FramebufferMask::COLOR0, ColorRgba::black())
            }
            Opcode::EnableStereo => batch.enable_stereo(bind),
        }
        expected.push(op);
    }
    expected
}

#[test]
fn one_command_per_call_with_fixed_arity() {
    let mut rng = Lcg(0x5eed);
    for calls in [0usize, 1, 7, 64, 500] {
        let mut batch = Batch::new();
        let expected = record_random(&mut batch, &mut rng, calls);

        assert_eq!(batch.len(), calls);
        let recorded: Vec<Opcode> = batch.iter().map(|c| c.opcode()).collect();
        assert_eq!(recorded, expected);

        let mut params = 0;
        let mut resources = 0;
        for cmd in &batch {
            let arity = cmd.opcode().arity();
            assert_eq!(cmd.params().len(), arity.params);
            assert_eq!(cmd.resources().len(), arity.resources);
            params += arity.params;
            resources += arity.resources;
        }

        let encoded = batch.encode();
        assert_eq!(encoded.params.len(), params);
        assert_eq!(encoded.resources.len(), resources);
        assert_eq!(encoded.decode().unwrap().as_slice(), batch.commands());
    }
}

#[test]
fn clear_after_recording_leaves_everything_empty() {
    let mut rng = Lcg(42);
    let mut batch = Batch::new();
    record_random(&mut batch, &mut rng, 200);
    assert!(!batch.is_empty());

    batch.clear();

    assert!(batch.commands().is_empty());
    assert!(batch.params().is_empty());
    assert!(batch.resources().is_empty());
    assert!(batch.encode().opcodes.is_empty());
}
