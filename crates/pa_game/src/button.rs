use glam::Vec2;
use pa_core::{Canvas, Rect, Rgb, TextAnchor};

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 50.0;
pub const BUTTON_TEXT_SIZE: f32 = 30.0;
pub const BUTTON_COLOR: Rgb = Rgb(100, 100, 200);
pub const BUTTON_HOVER_COLOR: Rgb = Rgb(150, 150, 250);

/// What a button does when clicked. The session interprets these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    StartGame,
    ToggleSound,
    Exit,
    ReturnToMenu,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub action: UiAction,
    pub color: Rgb,
    pub hover_color: Rgb,
}

impl Button {
    pub fn new(position: Vec2, label: impl Into<String>, action: UiAction) -> Self {
        Self {
            rect: Rect::new(position.x, position.y, BUTTON_WIDTH, BUTTON_HEIGHT),
            label: label.into(),
            action,
            color: BUTTON_COLOR,
            hover_color: BUTTON_HOVER_COLOR,
        }
    }

    pub fn is_hovered(&self, pointer: Vec2) -> bool {
        self.rect.contains(pointer)
    }

    pub fn check_click(&self, position: Vec2) -> Option<UiAction> {
        self.is_hovered(position).then_some(self.action)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, pointer: Vec2) {
        let color = if self.is_hovered(pointer) {
            self.hover_color
        } else {
            self.color
        };
        canvas.fill_rect(self.rect, color);
        canvas.draw_text(
            &self.label,
            TextAnchor::Center(self.rect.center()),
            BUTTON_TEXT_SIZE,
            Rgb::WHITE,
        );
    }
}

/// First button under `position`, if any.
pub fn click_any(buttons: &[Button], position: Vec2) -> Option<UiAction> {
    buttons
        .iter()
        .find_map(|button| button.check_click(position))
}
