use glam::Vec2;
use pa_core::{AnimatedSprite, Canvas, FrameSeq, Rect};

use crate::audio::Sfx;
use crate::entity::{Entity, Tick};
use crate::level::EnemySpawn;

pub const ENEMY_SIZE: f32 = 50.0;
pub const ENEMY_FRAMES: FrameSeq = &["enemy1", "enemy2"];

/// Walks back and forth around its spawn x. Ignores terrain and gravity.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    start_x: f32,
    patrol_range: f32,
    direction: f32,
    speed: f32,
    sprite: AnimatedSprite,
}

impl Enemy {
    pub fn new(position: Vec2, patrol_range: f32, speed: f32, frame_secs: f32) -> Self {
        Self {
            rect: Rect::new(position.x, position.y, ENEMY_SIZE, ENEMY_SIZE),
            start_x: position.x,
            patrol_range,
            direction: 1.0,
            speed,
            sprite: AnimatedSprite::new(ENEMY_FRAMES, frame_secs),
        }
    }

    pub fn from_spawn(spawn: &EnemySpawn, speed: f32, frame_secs: f32) -> Self {
        Self::new(spawn.position, spawn.patrol_range, speed, frame_secs)
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    pub fn patrol(&mut self, dt: f32) {
        self.rect.x += self.speed * self.direction;
        if (self.rect.x - self.start_x).abs() > self.patrol_range {
            self.direction = -self.direction;
        }
        self.sprite.update(dt);
    }
}

impl Entity for Enemy {
    fn update(&mut self, tick: &Tick<'_>) -> Option<Sfx> {
        self.patrol(tick.dt);
        None
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.sprite.draw(canvas, self.rect.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_after_exceeding_range() {
        let mut enemy = Enemy::new(Vec2::new(300.0, 535.0), 10.0, 2.0, 0.15);
        // 2, 4, 6, 8, 10 stay within range; 12 exceeds it.
        for _ in 0..5 {
            enemy.patrol(0.0);
            assert_eq!(enemy.direction(), 1.0);
        }
        enemy.patrol(0.0);
        assert_eq!(enemy.rect.x, 312.0);
        assert_eq!(enemy.direction(), -1.0);
        enemy.patrol(0.0);
        assert_eq!(enemy.rect.x, 310.0);
    }

    #[test]
    fn patrol_stays_near_spawn_and_keeps_height() {
        let mut enemy = Enemy::new(Vec2::new(600.0, 535.0), 100.0, 2.0, 0.15);
        for _ in 0..1000 {
            enemy.patrol(1.0 / 60.0);
            assert!((enemy.rect.x - 600.0).abs() <= 100.0 + 2.0 * 2.0);
            assert_eq!(enemy.rect.y, 535.0);
        }
    }

    #[test]
    fn animates_on_its_own_cadence() {
        let mut enemy = Enemy::new(Vec2::new(0.0, 0.0), 100.0, 2.0, 0.15);
        assert_eq!(enemy.sprite().current_frame(), "enemy1");
        enemy.patrol(0.15);
        assert_eq!(enemy.sprite().current_frame(), "enemy2");
        enemy.patrol(0.15);
        assert_eq!(enemy.sprite().current_frame(), "enemy1");
    }
}
