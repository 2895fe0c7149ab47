//! Axis-aligned rectangles in screen space (origin top-left, y grows downward).

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap,
    /// and a rectangle with zero width or height never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_position_and_size() {
        let r = Rect::new(10.0, 20.0, 50.0, 27.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 47.0);
        assert_eq!(r.center(), Vec2::new(35.0, 33.5));
    }

    #[test]
    fn setters_move_without_resizing() {
        let mut r = Rect::new(0.0, 0.0, 50.0, 27.0);
        r.set_bottom(550.0);
        assert_eq!(r.y, 523.0);
        r.set_right(800.0);
        assert_eq!(r.x, 750.0);
        r.set_left(-3.0);
        assert_eq!(r.right(), 47.0);
        assert_eq!(r.h, 27.0);
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbour = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right_neighbour));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn empty_rect_never_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(5.0, 5.0, 0.0, 4.0)));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(300.0, 200.0, 200.0, 50.0);
        assert!(r.contains(Vec2::new(300.0, 200.0)));
        assert!(r.contains(Vec2::new(499.9, 249.9)));
        assert!(!r.contains(Vec2::new(500.0, 220.0)));
        assert!(!r.contains(Vec2::new(350.0, 250.0)));
    }
}
