//! The one built-in level: world bounds, terrain and spawn points.

use glam::Vec2;
use pa_core::Rect;

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;
pub const FLOOR_Y: f32 = WORLD_HEIGHT - 50.0;

pub const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, WORLD_HEIGHT - 77.0);

pub const PLATFORMS: [Rect; 3] = [
    Rect::new(200.0, 450.0, 100.0, 20.0),
    Rect::new(400.0, 400.0, 100.0, 20.0),
    Rect::new(600.0, 450.0, 100.0, 20.0),
];

pub const COIN_POSITIONS: [Vec2; 3] = [
    Vec2::new(210.0, 420.0),
    Vec2::new(410.0, 370.0),
    Vec2::new(610.0, 420.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub position: Vec2,
    pub patrol_range: f32,
}

pub const ENEMY_SPAWNS: [EnemySpawn; 2] = [
    EnemySpawn {
        position: Vec2::new(300.0, WORLD_HEIGHT - 65.0),
        patrol_range: 150.0,
    },
    EnemySpawn {
        position: Vec2::new(600.0, WORLD_HEIGHT - 65.0),
        patrol_range: 100.0,
    },
];

/// Static collision geometry: the world's horizontal extent, the floor line
/// and one-way platforms that can only be landed on from above.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    pub world_width: f32,
    pub floor_y: f32,
    pub platforms: Vec<Rect>,
}

impl Terrain {
    pub fn standard() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            floor_y: FLOOR_Y,
            platforms: PLATFORMS.to_vec(),
        }
    }

    /// The visible ground band below the floor line.
    pub fn ground_rect(&self, world_height: f32) -> Rect {
        Rect::new(0.0, self.floor_y, self.world_width, world_height - self.floor_y)
    }
}
