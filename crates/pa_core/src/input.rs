//! Keyboard and pointer state as seen by the simulation.
//!
//! Keys are level-triggered (`is_held`) with an edge-triggered companion
//! (`is_just_pressed`) for host shortcuts. Edges survive until `end_frame()`,
//! which the host calls once at the end of every redraw.
//!
//! Pointer presses are queued with the position they happened at and drained
//! exactly once by `take_pointer_presses()`, so each press reaches the UI a
//! single time no matter how many steps run in the frame.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    A,
    D,
    W,
    Escape,
    F3,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    pending_presses: Vec<Vec2>,
    pointer_position: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// True if any of `keys` is currently down.
    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|key| self.held.contains(key))
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer_position = position;
    }

    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    /// Record a press at `position`; the pointer is moved there as well.
    pub fn pointer_pressed(&mut self, position: Vec2) {
        self.pointer_position = position;
        self.pending_presses.push(position);
    }

    pub fn take_pointer_presses(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.pending_presses)
    }

    /// Drop edge-triggered key state. Held keys persist.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Forget everything that is down, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        assert!(input.is_held(Key::Left));
        assert!(input.is_just_pressed(Key::Left));
    }

    #[test]
    fn os_key_repeat_does_not_retrigger_edge() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }

    #[test]
    fn end_frame_keeps_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.end_frame();
        assert!(input.is_held(Key::Right));
        assert!(!input.is_just_pressed(Key::Right));
        input.key_up(Key::Right);
        assert!(!input.is_held(Key::Right));
    }

    #[test]
    fn any_held_checks_alternate_bindings() {
        let mut input = InputState::new();
        assert!(!input.any_held(&[Key::Left, Key::A]));
        input.key_down(Key::A);
        assert!(input.any_held(&[Key::Left, Key::A]));
    }

    #[test]
    fn pointer_presses_are_delivered_once() {
        let mut input = InputState::new();
        input.pointer_pressed(Vec2::new(10.0, 20.0));
        input.pointer_pressed(Vec2::new(30.0, 40.0));
        assert_eq!(input.pointer_position(), Vec2::new(30.0, 40.0));

        let presses = input.take_pointer_presses();
        assert_eq!(presses, vec![Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0)]);
        assert!(input.take_pointer_presses().is_empty());
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Space);
        input.release_all();
        assert!(!input.is_held(Key::Left));
        assert!(!input.is_just_pressed(Key::Space));
    }
}
