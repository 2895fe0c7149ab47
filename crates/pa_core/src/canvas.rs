//! Drawing capability supplied by the host.
//!
//! The game never rasterizes anything itself. Each frame it issues a flat list
//! of requests against a `Canvas`: clear, filled rectangles, images placed by
//! their top-left corner, and text. The host decides how those become pixels.

use glam::Vec2;

use crate::rect::Rect;

/// Default text size used when the caller has no preference.
pub const DEFAULT_TEXT_SIZE: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    /// Linear 0..1 RGBA with full opacity.
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            1.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    TopLeft(Vec2),
    Center(Vec2),
}

pub trait Canvas {
    /// Fill the whole frame with one color.
    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draw the image named `image` with its top-left corner at `position`.
    fn draw_image(&mut self, image: &str, position: Vec2);

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, size: f32, color: Rgb);
}
