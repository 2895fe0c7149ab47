use glam::Vec2;
use pa_core::{Canvas, Rect};

pub const COIN_SIZE: f32 = 20.0;
pub const COIN_IMAGE: &str = "coin";

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub rect: Rect,
    collected: bool,
}

impl Coin {
    pub fn new(position: Vec2) -> Self {
        Self {
            rect: Rect::new(position.x, position.y, COIN_SIZE, COIN_SIZE),
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Marks the coin collected. Returns true only on the first call.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    pub fn reset(&mut self) {
        self.collected = false;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.collected {
            canvas.draw_image(COIN_IMAGE, self.rect.position());
        }
    }
}
