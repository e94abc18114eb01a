//! Blur task scenarios observed through the batches it submits.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use veil_gpu::batch::{Command, Opcode, Primitive};
use veil_gpu::context::{TraceBackend, TraceStats};
use veil_gpu::coords::{ColorRgba, Viewport};
use veil_gpu::logging::{init_logging, LoggingConfig};
use veil_gpu::resource::{Framebuffer, FramebufferMask, FramebufferRef, Handle, Texture};
use veil_gpu::{Backend, Batch, Context};
use veil_render::blur::{BLUR_PARAMS_SLOT, BLUR_SOURCE_SLOT};
use veil_render::{BlurConfig, BlurGaussian, RenderArgs, RenderContext, Task, ViewFrustum};

const COLOR: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const DEPTH: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

#[derive(Default, Clone)]
struct Capture(Rc<RefCell<Vec<Batch>>>);

impl Backend for Capture {
    fn execute(&mut self, batch: &Batch) -> Result<()> {
        self.0.borrow_mut().push(batch.clone());
        Ok(())
    }
}

fn setup(capture: &Capture, w: i32, h: i32) -> RenderContext {
    init_logging(LoggingConfig {
        env_filter: Some("debug".into()),
        is_test: true,
        ..Default::default()
    });
    RenderContext::with_args(
        Context::new(capture.clone()),
        RenderArgs::new(Viewport::from_size(w, h), ViewFrustum::default()),
    )
}

fn source_with_depth(w: u32, h: u32) -> FramebufferRef {
    let fb = Framebuffer::create_render_target(COLOR, w, h, 1);
    let depth = Texture::create_render_target(DEPTH, w, h, 1);
    assert!(fb.borrow_mut().set_depth_stencil_buffer(depth, DEPTH));
    fb
}

#[test]
fn single_run_records_the_two_pass_sequence() {
    let capture = Capture::default();
    let mut ctx = setup(&capture, 64, 64);
    let source = Framebuffer::create_render_target(COLOR, 64, 64, 1);
    let source_color = source.borrow().render_buffer(0).cloned().unwrap();

    let mut blur = BlurGaussian::new();
    blur.configure(&BlurConfig { filter_scale: 2.0 });
    let out = blur.run(&mut ctx, Some(&source)).unwrap();

    assert!(out.is_some_and(|fb| Handle::ptr_eq(&fb, &source)));

    let batches = capture.0.borrow();
    assert_eq!(batches.len(), 1);
    let cmds = batches[0].commands();

    let ops: Vec<Opcode> = cmds.iter().map(Command::opcode).collect();
    assert_eq!(
        ops,
        vec![
            Opcode::EnableStereo,
            Opcode::SetViewportTransform,
            Opcode::SetUniformBuffer,
            Opcode::SetFramebuffer,
            Opcode::ClearColorFramebuffer,
            Opcode::SetPipeline,
            Opcode::SetResourceTexture,
            Opcode::Draw,
            Opcode::SetFramebuffer,
            Opcode::SetPipeline,
            Opcode::SetResourceTexture,
            Opcode::Draw,
            Opcode::SetResourceTexture,
            Opcode::SetUniformBuffer,
        ]
    );

    let intermediate = blur.blurred_framebuffer().cloned().unwrap();
    let intermediate_color = intermediate.borrow().render_buffer(0).cloned().unwrap();
    let params = blur.parameters().buffer().clone();

    assert_eq!(cmds[0], Command::EnableStereo(false));
    assert_eq!(cmds[1], Command::SetViewportTransform(Viewport::from_size(64, 64)));
    assert_eq!(
        cmds[2],
        Command::SetUniformBuffer {
            slot: BLUR_PARAMS_SLOT,
            buffer: Some(params),
        }
    );
    assert_eq!(cmds[3], Command::SetFramebuffer(Some(intermediate)));
    assert_eq!(
        cmds[4],
        Command::ClearColorFramebuffer {
            targets: FramebufferMask::COLOR0,
            color: ColorRgba::zero(),
        }
    );
    assert_eq!(
        cmds[6],
        Command::SetResourceTexture {
            slot: BLUR_SOURCE_SLOT,
            texture: Some(source_color),
        }
    );
    let quad = Command::Draw {
        primitive: Primitive::TriangleStrip,
        vertex_count: 4,
        start_vertex: 0,
    };
    assert_eq!(cmds[7], quad);
    assert_eq!(cmds[8], Command::SetFramebuffer(Some(source.clone())));
    assert_eq!(
        cmds[10],
        Command::SetResourceTexture {
            slot: BLUR_SOURCE_SLOT,
            texture: Some(intermediate_color),
        }
    );
    assert_eq!(cmds[11], quad);
    assert_eq!(
        cmds[12],
        Command::SetResourceTexture {
            slot: BLUR_SOURCE_SLOT,
            texture: None,
        }
    );
    assert_eq!(
        cmds[13],
        Command::SetUniformBuffer {
            slot: BLUR_PARAMS_SLOT,
            buffer: None,
        }
    );

    let (Command::SetPipeline(Some(v)), Command::SetPipeline(Some(h))) = (&cmds[5], &cmds[9]) else {
        panic!("expected pipeline binds at 5 and 9");
    };
    assert_eq!(v.borrow().program().pixel().name(), "blur_gaussian_v");
    assert_eq!(h.borrow().program().pixel().name(), "blur_gaussian_h");

    let p = blur.parameters();
    assert_eq!(p.filter_radius_scale(), 2.0);
    assert!((p.filter_increment() - 2.0 / 7.0).abs() < 1e-6);
}

#[test]
fn resize_keeps_depth_stencil_attached() {
    let capture = Capture::default();
    let mut ctx = setup(&capture, 100, 100);
    let mut blur = BlurGaussian::new();

    blur.run(&mut ctx, Some(&source_with_depth(100, 100))).unwrap();
    let first = blur.blurred_framebuffer().cloned().unwrap();
    assert!(first.borrow().has_depth_stencil());

    let bigger = source_with_depth(200, 150);
    blur.run(&mut ctx, Some(&bigger)).unwrap();

    let fb = blur.blurred_framebuffer().unwrap();
    assert!(Handle::ptr_eq(fb, &first));
    let fb = fb.borrow();
    assert_eq!(fb.size(), (200, 150));
    assert!(fb.has_depth_stencil());
    assert!(Handle::ptr_eq(
        fb.depth_stencil_buffer().unwrap(),
        bigger.borrow().depth_stencil_buffer().unwrap()
    ));
    assert_eq!(capture.0.borrow().len(), 2);
}

#[test]
fn run_without_source_changes_nothing() {
    let capture = Capture::default();
    let mut ctx = setup(&capture, 64, 64);
    let mut blur = BlurGaussian::new();
    let stamp = blur.parameters().buffer().borrow().stamp();

    let out = blur.run(&mut ctx, None).unwrap();

    assert!(out.is_none());
    assert!(capture.0.borrow().is_empty());
    assert_eq!(ctx.gpu.batches_submitted(), 0);
    assert!(blur.blurred_framebuffer().is_none());
    assert!(!blur.pipelines().is_vertical_built());
    assert!(!blur.pipelines().is_horizontal_built());
    assert_eq!(blur.parameters().buffer().borrow().stamp(), stamp);
}

#[test]
fn run_without_source_after_a_frame_keeps_cached_state() {
    let capture = Capture::default();
    let mut ctx = setup(&capture, 64, 64);
    let source = Framebuffer::create_render_target(COLOR, 64, 64, 1);
    let mut blur = BlurGaussian::new();
    blur.run(&mut ctx, Some(&source)).unwrap();

    let fb = blur.blurred_framebuffer().cloned().unwrap();
    let stamp = blur.parameters().buffer().borrow().stamp();

    blur.run(&mut ctx, None).unwrap();

    assert_eq!(capture.0.borrow().len(), 1);
    assert!(Handle::ptr_eq(blur.blurred_framebuffer().unwrap(), &fb));
    assert_eq!(fb.borrow().size(), (64, 64));
    assert!(blur.pipelines().is_vertical_built());
    assert_eq!(blur.parameters().buffer().borrow().stamp(), stamp);
}

#[test]
fn task_interface_drives_the_same_recording() {
    let capture = Capture::default();
    let mut ctx = setup(&capture, 32, 32);
    let source = Framebuffer::create_render_target(COLOR, 32, 32, 1);

    let mut task: Box<dyn Task<Config = BlurConfig, Input = Option<FramebufferRef>, Output = Option<FramebufferRef>>> =
        Box::new(BlurGaussian::new());
    task.configure(&BlurConfig::default());
    let out = task.run(&mut ctx, Some(source.clone())).unwrap();

    assert!(out.is_some());
    assert_eq!(capture.0.borrow()[0].len(), 14);
}

#[test]
fn batch_references_are_released_once_dropped() {
    let capture = Capture::default();
    let mut ctx = setup(&capture, 16, 16);
    let source = Framebuffer::create_render_target(COLOR, 16, 16, 1);
    let mut blur = BlurGaussian::new();
    blur.run(&mut ctx, Some(&source)).unwrap();

    let held = Handle::owners(&source);
    capture.0.borrow_mut().clear();
    // The capture kept the only batch, which bound the source once.
    assert_eq!(Handle::owners(&source), held - 1);
}

#[test]
fn trace_backend_sees_two_full_screen_draws_per_frame() {
    init_logging(LoggingConfig {
        env_filter: Some("trace".into()),
        is_test: true,
        ..Default::default()
    });
    let trace = TraceBackend::new();
    let mut ctx = RenderContext::with_args(
        Context::new(trace.clone()),
        RenderArgs::new(Viewport::from_size(48, 48), ViewFrustum::default()),
    );
    let source = Framebuffer::create_render_target(COLOR, 48, 48, 1);
    let mut blur = BlurGaussian::new();

    for _ in 0..3 {
        blur.run(&mut ctx, Some(&source)).unwrap();
    }

    assert_eq!(
        trace.stats(),
        TraceStats {
            batches: 3,
            commands: 3 * 14,
            draws: 3 * 2,
            vertices: 3 * 8,
        }
    );
}
