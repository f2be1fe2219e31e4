use sequel_engine::device::GpuInit;
use sequel_engine::logging::{init_logging, LoggingConfig};
use sequel_engine::transform::pixel_space;
use sequel_engine::window::{App, AppControl, FrameCtx, Runtime, RuntimeConfig};
use sequel_engine::{
    BatchConfig, BlendFunc, Color, FilterMode, Rect, Renderer, ShaderOptions, TextureId,
    UniformLocation, Vec2, WgpuBackend,
};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Brightness wave across each sprite, driven by the `time` uniform.
const PULSE_EFFECT: &str = r#"
fn effect(color: vec4<f32>, uv: vec2<f32>) -> vec4<f32> {
    let t = param_time().x;
    let glow = 0.75 + 0.25 * sin(t * 3.0 + uv.x * 6.2831853);
    return vec4<f32>(color.rgb * glow, color.a);
}
"#;

const GRID: usize = 6;
const SPRITE: f32 = 64.0;

struct Scene {
    renderer: Renderer<WgpuBackend>,
    checker: TextureId,
    time: Option<UniformLocation>,
}

#[derive(Default)]
struct Demo {
    scene: Option<Scene>,
}

impl Demo {
    fn setup(ctx: &FrameCtx<'_, '_>) -> anyhow::Result<Scene> {
        let options = ShaderOptions::default()
            .with_effect(PULSE_EFFECT)
            .with_uniform("time");
        let backend = WgpuBackend::new(
            ctx.gpu.device(),
            ctx.gpu.queue(),
            ctx.gpu.surface_format(),
            &options,
        )?;

        let mut renderer = Renderer::new(backend, BatchConfig::from_env())?;
        let checker = renderer.create_texture(&checkerboard(8), 8, 8, FilterMode::Nearest)?;
        let time = renderer.uniform_location("time");

        Ok(Scene {
            renderer,
            checker,
            time,
        })
    }
}

impl App for Demo {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state == ElementState::Pressed
                && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
            {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.scene.is_none() {
            match Demo::setup(ctx) {
                Ok(scene) => self.scene = Some(scene),
                Err(err) => {
                    log::error!("renderer setup failed: {err:#}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Exit;
        };

        let (w, h) = ctx.size();
        let t = ctx.time.elapsed;
        let mut outcome = Ok(());

        let control = ctx.render(|view| {
            scene.renderer.backend_mut().set_target(view.clone());
            outcome = draw(scene, w as f32, h as f32, t);
            scene.renderer.flush();
            scene.renderer.backend_mut().take_target();
        });

        if let Some(err) = scene.renderer.error(true) {
            log::warn!("{err}");
        }

        match outcome {
            Err(err) if err.is_fatal() => {
                log::error!("{err}");
                AppControl::Exit
            }
            Err(err) => {
                log::warn!("frame dropped geometry: {err}");
                control
            }
            Ok(()) => control,
        }
    }

    fn on_exit(&mut self) {
        if let Some(scene) = self.scene.take() {
            let stats = scene.renderer.stats();
            log::info!(
                "{} flushes, {} vertices, {} buffer growths",
                stats.flushes,
                stats.vertices_submitted,
                stats.growths
            );
            scene.renderer.teardown();
        }
    }
}

fn draw(scene: &mut Scene, width: f32, height: f32, t: f32) -> sequel_engine::Result<()> {
    let r = &mut scene.renderer;

    r.clear(Color::new(0.08, 0.09, 0.12, 1.0));
    r.set_transform_matrix(pixel_space(width, height));
    if let Some(time) = scene.time {
        r.set_uniform_float(time, t);
    }

    // Textured sprites: one batch per row color.
    r.set_blend(BlendFunc::ALPHA);
    r.set_texture(Some(scene.checker));
    let cell = (width.min(height) / GRID as f32).max(SPRITE);
    for row in 0..GRID {
        let hue = row as f32 / GRID as f32;
        r.set_color(Color::new(1.0 - hue, 0.5 + 0.5 * hue, hue, 1.0));
        for col in 0..GRID {
            let origin = Vec2::new(col as f32 * cell + 8.0, row as f32 * cell + 8.0);
            let spin = t * (0.5 + 0.25 * col as f32);
            r.rectangle(
                Rect::from_origin_size(origin, Vec2::new(SPRITE, SPRITE)),
                Vec2::zero(),
                Vec2::new(2.0, 2.0),
                spin,
            )?;
        }
    }

    // Additive untextured fan in the middle of the window.
    r.set_texture(None);
    r.set_blend(BlendFunc::ADDITIVE);
    r.set_color(Color::new(0.9, 0.4, 0.1, 0.35));
    let center = Vec2::new(width * 0.5, height * 0.5);
    let radius = width.min(height) * 0.3;
    let blades = 12;
    for i in 0..blades {
        let a0 = t + i as f32 / blades as f32 * std::f32::consts::TAU;
        let a1 = a0 + 0.2;
        let p0 = center + Vec2::new(a0.cos(), a0.sin()) * radius;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
        r.triangle([center, p0, p1], [Vec2::zero(); 3])?;
    }

    Ok(())
}

fn checkerboard(size: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let v = if (x + y) % 2 == 0 { 255 } else { 96 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "sequel demo".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), Demo::default())
}
