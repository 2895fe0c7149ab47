use pa_core::{Canvas, Rect};

use crate::audio::Sfx;
use crate::level::Terrain;
use crate::player::PlayerInput;

/// Everything an entity may read during one simulation step.
pub struct Tick<'a> {
    pub dt: f32,
    pub input: PlayerInput,
    pub terrain: &'a Terrain,
}

/// Shared shape of the moving things in the world. `update` returns the sound
/// cue the step produced, if any.
pub trait Entity {
    fn update(&mut self, tick: &Tick<'_>) -> Option<Sfx>;
    fn bounds(&self) -> Rect;
    fn draw(&self, canvas: &mut dyn Canvas);
}
