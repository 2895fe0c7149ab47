//! Host-agnostic building blocks shared by the game and its host loop.

pub mod animation;
pub mod canvas;
pub mod input;
pub mod rect;
pub mod time;
pub mod timer;

pub use animation::{AnimatedSprite, FrameSeq};
pub use canvas::{Canvas, Rgb, TextAnchor};
pub use rect::Rect;
