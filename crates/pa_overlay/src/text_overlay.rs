//! Text layer rendered with egui on top of the quad pass.
//!
//! The game describes text in world units (top-left anchored or centered at a
//! point, with a pixel size). Each frame those requests are painted onto egui's
//! background layer, scaled from world units into egui points. The same egui
//! context also hosts the F3 debug window.
//!
//! egui needs a split render because `egui_wgpu::Renderer::render()` wants a
//! `RenderPass<'static>` while `begin_render_pass` borrows the encoder:
//!
//!   1. `prepare()` -- paint text and debug UI, tessellate
//!   2. `upload()`  -- upload textures and update GPU buffers
//!   3. `paint()`   -- render into a pass created with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references

use glam::Vec2;
use pa_core::time::FrameClock;
use pa_core::{Rgb, TextAnchor};
use winit::window::Window;

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub anchor: TextAnchor,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayStats {
    pub game_state: String,
    pub score: u32,
    pub sound_on: bool,
    pub quads: u32,
    pub draw_calls: u32,
    pub textures: u32,
    /// Estimated GPU memory usage in megabytes
    pub memory_estimate_mb: f32,
}

pub struct TextOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub debug_visible: bool,
}

impl TextOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            debug_visible: false,
        }
    }

    /// Forward a window event to egui. Returns true if egui consumed it.
    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!(
            "Debug overlay: {}",
            if self.debug_visible { "ON" } else { "OFF" }
        );
    }

    /// Paint `texts` and, when enabled, the debug window. `world_to_points`
    /// converts world units into egui points per axis.
    pub fn prepare(
        &mut self,
        window: &Window,
        world_to_points: Vec2,
        texts: &[TextItem],
        clock: &FrameClock,
        stats: &OverlayStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let debug_visible = self.debug_visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            for item in texts {
                let (pos, align, size) = layout_text(item, world_to_points);
                let Rgb(r, g, b) = item.color;
                painter.text(
                    pos,
                    align,
                    &item.text,
                    egui::FontId::proportional(size),
                    egui::Color32::from_rgb(r, g, b),
                );
            }

            if debug_visible {
                egui::Window::new("Debug")
                    .default_pos([10.0, 80.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", clock.smoothed_frame_time_ms));
                        ui.label(format!("Steps this frame: {}", clock.steps_this_frame));
                        ui.label(format!("Total steps: {}", clock.fixed_step_count));
                        ui.separator();
                        ui.label(format!("State: {}", stats.game_state));
                        ui.label(format!("Score: {}", stats.score));
                        ui.label(format!(
                            "Sound: {}",
                            if stats.sound_on { "on" } else { "off" }
                        ));
                        ui.separator();
                        ui.label(format!("Quads: {}", stats.quads));
                        ui.label(format!("Draw calls: {}", stats.draw_calls));
                        ui.label(format!("Textures: {}", stats.textures));
                        ui.label(format!("Memory: {:.1} MB", stats.memory_estimate_mb));
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Position, alignment and font size in egui points for one text request.
/// Font size follows the smaller axis scale so text never overflows when the
/// window aspect differs from the world's.
fn layout_text(item: &TextItem, world_to_points: Vec2) -> (egui::Pos2, egui::Align2, f32) {
    let (point, align) = match item.anchor {
        TextAnchor::TopLeft(p) => (p, egui::Align2::LEFT_TOP),
        TextAnchor::Center(p) => (p, egui::Align2::CENTER_CENTER),
    };
    let scaled = point * world_to_points;
    let size = item.size * world_to_points.x.min(world_to_points.y);
    (egui::pos2(scaled.x, scaled.y), align, size)
}
