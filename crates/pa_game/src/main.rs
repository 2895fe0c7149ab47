//! Pixel Adventurer -- host loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Everything happens in
//! `RedrawRequested` on a fixed-timestep model (see `FrameClock`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. deliver queued pointer presses and host shortcuts (Escape, F3)
//!   3. `while should_step()` -- run `Session::update` with the fixed dt
//!   4. draw the session through `SceneCanvas` into a quad batch + text list
//!   5. quad pass, then the egui text/debug pass on top
//!
//! Gravity and speeds are applied per step, so the fixed step is what keeps
//! the game feeling the same at any display refresh rate.

mod audio;
mod button;
mod coin;
mod config;
mod enemy;
mod entity;
mod level;
mod player;
#[cfg(test)]
mod replay;
mod scene_canvas;
mod session;
mod sprites;
mod synth;

use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::GameConfig;
use level::{WORLD_HEIGHT, WORLD_WIDTH};
use pa_core::input::{InputState, Key};
use pa_core::time::FrameClock;
use pa_overlay::{OverlayStats, TextItem, TextOverlay};
use pa_platform::window::PlatformConfig;
use pa_render::{GpuContext, QuadBatch, QuadRenderer, ScreenCamera, Texture};
use player::PlayerInput;
use scene_canvas::SceneCanvas;
use session::Session;
use sprites::{all_image_ids, load_sprite_image, white_image, SpriteImage, SpriteSizes, IMAGE_DIR};
use synth::SynthAudio;

/// All host state. Built in `ApplicationHandler::resumed` once a window exists.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    clock: FrameClock,
    input: InputState,
    camera: ScreenCamera,
    renderer: QuadRenderer,
    overlay: TextOverlay,

    // --- Per-frame draw output, reused between frames -----------------------
    batch: QuadBatch,
    texts: Vec<TextItem>,
    sprite_sizes: SpriteSizes,

    audio: SynthAudio,
    session: Session,
}

impl EngineState {
    fn new(window: Arc<Window>, config: &GameConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let camera = ScreenCamera::new(WORLD_WIDTH, WORLD_HEIGHT, gpu.size);
        let mut renderer = QuadRenderer::new(&gpu, &camera);
        let overlay = TextOverlay::new(&gpu.device, gpu.surface_format, &window);
        let sprite_sizes = upload_images(&gpu, &mut renderer, Path::new(IMAGE_DIR));

        let mut audio = SynthAudio::new();
        let session = Session::new(config.clone());
        session.start_audio(&mut audio);

        Ok(Self {
            window,
            clock: FrameClock::new(config.fixed_dt as f64),
            input: InputState::new(),
            camera,
            renderer,
            overlay,
            batch: QuadBatch::new(),
            texts: Vec::new(),
            sprite_sizes,
            audio,
            session,
            gpu,
        })
    }

    /// Run this frame's simulation. Returns false once the game wants to quit.
    fn simulate(&mut self) -> bool {
        self.clock.begin_frame();

        for press in self.input.take_pointer_presses() {
            self.session.pointer_pressed(press, &mut self.audio);
        }
        if self.input.is_just_pressed(Key::Escape) {
            self.session.request_exit();
        }
        if self.input.is_just_pressed(Key::F3) {
            self.overlay.toggle_debug();
        }

        let dt = self.clock.fixed_dt as f32;
        let player_input = PlayerInput::from_keys(&self.input);
        while self.clock.should_step() {
            self.session.update(dt, player_input, &mut self.audio);
        }

        !self.session.exit_requested()
    }

    fn render(&mut self) {
        let clear_color = {
            let mut canvas = SceneCanvas::new(
                &mut self.batch,
                &mut self.texts,
                &self.sprite_sizes,
                self.gpu.is_srgb(),
            );
            self.session.draw(&mut canvas);
            canvas.clear_color()
        };
        self.renderer.prepare(&self.gpu, &self.camera, &self.batch);

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let pixels_per_point = self.window.scale_factor() as f32;
        let world_to_points = self.camera.pixels_per_unit() / pixels_per_point;
        let stats = OverlayStats {
            game_state: self.session.state().to_string(),
            score: self.session.score(),
            sound_on: self.session.sound_on(),
            quads: self.batch.quad_count() as u32,
            draw_calls: self.batch.draw_calls.len() as u32,
            textures: self.renderer.texture_count() as u32,
            memory_estimate_mb: self.renderer.estimate_memory_mb(),
        };
        let (egui_primitives, egui_textures_delta) = self.overlay.prepare(
            &self.window,
            world_to_points,
            &self.texts,
            &self.clock,
            &stats,
        );
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.renderer.draw(&mut render_pass, &self.batch);
        }

        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Text Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

/// Load every sprite image (or its placeholder) plus the white fill texture
/// into the renderer. Returns the drawn size of each image.
fn upload_images(gpu: &GpuContext, renderer: &mut QuadRenderer, dir: &Path) -> SpriteSizes {
    let mut sizes = SpriteSizes::default();
    let images = all_image_ids()
        .into_iter()
        .map(|id| load_sprite_image(dir, id))
        .chain(std::iter::once(white_image()));
    for image in images {
        upload_image(gpu, renderer, &image);
        sizes.insert(&image);
    }
    log::info!("Uploaded {} textures", renderer.texture_count());
    sizes
}

fn upload_image(gpu: &GpuContext, renderer: &mut QuadRenderer, image: &SpriteImage) {
    let texture = Texture::from_rgba8(
        &gpu.device,
        &gpu.queue,
        &image.rgba,
        image.width,
        image.height,
        &image.id,
    );
    renderer.insert_texture(&gpu.device, &image.id, texture);
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::Space => Some(Key::Space),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

struct App {
    platform: PlatformConfig,
    config: GameConfig,
    state: Option<EngineState>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            platform: PlatformConfig::default(),
            config,
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let started = pa_platform::window::create_window(event_loop, &self.platform)
            .and_then(|window| EngineState::new(window, &self.config));
        match started {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                    state.camera.viewport = (w, h);
                    log::info!("Resized to {}x{}", w, h);
                }
            }

            WindowEvent::Focused(false) => state.input.release_all(),

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let world = state
                    .camera
                    .screen_to_world(Vec2::new(position.x as f32, position.y as f32));
                state.input.pointer_moved(world);
                state.session.pointer_moved(world);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !egui_consumed => {
                let position = state.input.pointer_position();
                state.input.pointer_pressed(position);
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                if !state.simulate() {
                    event_loop.exit();
                    return;
                }
                state.render();
                state.input.end_frame();
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Pixel Adventurer starting...");

    let config = match config::load_config_from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        std::process::exit(1);
    }
}
