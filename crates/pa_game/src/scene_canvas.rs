//! `Canvas` implementation that turns one frame's draw requests into a quad
//! batch for the GPU pass and a list of text items for the overlay.

use glam::Vec2;
use pa_core::{Canvas, Rect, Rgb, TextAnchor};
use pa_overlay::TextItem;
use pa_render::{linear_color, QuadBatch};

use crate::sprites::{SpriteSizes, WHITE_TEXTURE};

const UNTINTED: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub struct SceneCanvas<'a> {
    batch: &'a mut QuadBatch,
    texts: &'a mut Vec<TextItem>,
    sizes: &'a SpriteSizes,
    srgb_target: bool,
    clear_color: Rgb,
}

impl<'a> SceneCanvas<'a> {
    pub fn new(
        batch: &'a mut QuadBatch,
        texts: &'a mut Vec<TextItem>,
        sizes: &'a SpriteSizes,
        srgb_target: bool,
    ) -> Self {
        Self {
            batch,
            texts,
            sizes,
            srgb_target,
            clear_color: Rgb(0, 0, 0),
        }
    }

    /// Clear color for the render pass, in the surface's color space.
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = linear_color(self.clear_color, self.srgb_target);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

impl Canvas for SceneCanvas<'_> {
    fn clear(&mut self, color: Rgb) {
        self.batch.clear();
        self.texts.clear();
        self.clear_color = color;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.batch
            .push_quad(WHITE_TEXTURE, rect, linear_color(color, self.srgb_target));
    }

    fn draw_image(&mut self, image: &str, position: Vec2) {
        let size = self.sizes.size_of(image);
        let rect = Rect::new(position.x, position.y, size.x, size.y);
        self.batch.push_quad(image, rect, UNTINTED);
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, size: f32, color: Rgb) {
        self.texts.push(TextItem {
            text: text.to_string(),
            anchor,
            size,
            color,
        });
    }
}
