use glam::Vec2;
use pa_core::input::{InputState, Key};
use pa_core::{AnimatedSprite, Canvas, FrameSeq, Rect};

use crate::audio::Sfx;
use crate::config::GameConfig;
use crate::entity::{Entity, Tick};
use crate::level::Terrain;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 27.0;

pub const IDLE_RIGHT: FrameSeq = &["hero_idle1", "hero_idle2"];
pub const RUN_RIGHT: FrameSeq = &["hero_walk1", "hero_walk2"];
pub const JUMP_RIGHT: FrameSeq = &["hero_idle1"];
pub const IDLE_LEFT: FrameSeq = &["hero_idle_left1", "hero_idle_left2"];
pub const RUN_LEFT: FrameSeq = &["hero_walk_left1", "hero_walk_left2"];
pub const JUMP_LEFT: FrameSeq = &["hero_idle_left1"];

const LEFT_KEYS: &[Key] = &[Key::Left, Key::A];
const RIGHT_KEYS: &[Key] = &[Key::Right, Key::D];
const JUMP_KEYS: &[Key] = &[Key::Space, Key::Up, Key::W];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl PlayerInput {
    pub fn from_keys(input: &InputState) -> Self {
        Self {
            left: input.any_held(LEFT_KEYS),
            right: input.any_held(RIGHT_KEYS),
            jump: input.any_held(JUMP_KEYS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    pub speed: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub frame_secs: f32,
}

impl From<&GameConfig> for PlayerConfig {
    fn from(config: &GameConfig) -> Self {
        Self {
            speed: config.player_speed,
            gravity: config.gravity,
            jump_strength: config.jump_strength,
            frame_secs: config.player_frame_secs,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    Idle,
    Run,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

pub fn frames_for(locomotion: Locomotion, facing: Facing) -> FrameSeq {
    match (locomotion, facing) {
        (Locomotion::Idle, Facing::Right) => IDLE_RIGHT,
        (Locomotion::Idle, Facing::Left) => IDLE_LEFT,
        (Locomotion::Run, Facing::Right) => RUN_RIGHT,
        (Locomotion::Run, Facing::Left) => RUN_LEFT,
        (Locomotion::Jump, Facing::Right) => JUMP_RIGHT,
        (Locomotion::Jump, Facing::Left) => JUMP_LEFT,
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub prev_rect: Rect,
    pub velocity_y: f32,
    pub grounded: bool,
    pub facing: Facing,
    pub locomotion: Locomotion,
    sprite: AnimatedSprite,
    config: PlayerConfig,
}

impl Player {
    pub fn new(spawn: Vec2, config: PlayerConfig) -> Self {
        let rect = Rect::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            rect,
            prev_rect: rect,
            velocity_y: 0.0,
            grounded: false,
            facing: Facing::Right,
            locomotion: Locomotion::Idle,
            sprite: AnimatedSprite::new(IDLE_RIGHT, config.frame_secs),
            config,
        }
    }

    /// Advance one step. Returns true when a jump started this step.
    pub fn step(&mut self, input: PlayerInput, dt: f32, terrain: &Terrain) -> bool {
        self.prev_rect = self.rect;

        // Left wins when both directions are held.
        if input.left {
            self.rect.x -= self.config.speed;
            self.facing = Facing::Left;
            if self.grounded {
                self.locomotion = Locomotion::Run;
            }
        } else if input.right {
            self.rect.x += self.config.speed;
            self.facing = Facing::Right;
            if self.grounded {
                self.locomotion = Locomotion::Run;
            }
        } else if self.grounded {
            self.locomotion = Locomotion::Idle;
        }

        let jumped = input.jump && self.grounded;
        if jumped {
            self.velocity_y = self.config.jump_strength;
            self.locomotion = Locomotion::Jump;
        }

        // One gravity increment per step regardless of dt; the host runs a
        // fixed step so this stays display-rate independent.
        self.velocity_y += self.config.gravity;
        self.rect.y += self.velocity_y;

        // Grounded is driven from this step's contacts only.
        self.grounded = false;
        self.resolve_floor(terrain);
        self.resolve_platforms(terrain);

        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }
        if self.rect.right() > terrain.world_width {
            self.rect.set_right(terrain.world_width);
        }

        let frames = frames_for(self.locomotion, self.facing);
        if self.sprite.frames() != frames {
            self.sprite.swap_frames(frames);
        }
        self.sprite.update(dt);

        jumped
    }

    fn resolve_floor(&mut self, terrain: &Terrain) {
        if self.rect.bottom() >= terrain.floor_y {
            self.land_on(terrain.floor_y);
        }
    }

    /// One-way platforms: a landing needs overlap, a non-rising velocity and
    /// feet that were at or above the platform top on the previous step. When
    /// several platforms qualify the highest one wins.
    fn resolve_platforms(&mut self, terrain: &Terrain) {
        if self.velocity_y < 0.0 {
            return;
        }
        let landing = terrain
            .platforms
            .iter()
            .filter(|platform| {
                self.rect.overlaps(platform) && self.prev_rect.bottom() <= platform.top()
            })
            .map(|platform| platform.top())
            .min_by(|a, b| a.total_cmp(b));
        if let Some(top) = landing {
            self.land_on(top);
        }
    }

    fn land_on(&mut self, surface_y: f32) {
        self.rect.set_bottom(surface_y);
        self.velocity_y = 0.0;
        self.grounded = true;
    }

    /// Move to `position` keeping velocity and grounded state.
    pub fn teleport(&mut self, position: Vec2) {
        self.rect.x = position.x;
        self.rect.y = position.y;
    }

    /// Move to `position` and clear all motion state.
    pub fn respawn(&mut self, position: Vec2) {
        self.teleport(position);
        self.prev_rect = self.rect;
        self.velocity_y = 0.0;
        self.grounded = false;
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }
}

impl Entity for Player {
    fn update(&mut self, tick: &Tick<'_>) -> Option<Sfx> {
        self.step(tick.input, tick.dt, tick.terrain)
            .then_some(Sfx::Jump)
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
    use crate::level::{FLOOR_Y, PLAYER_SPAWN, WORLD_WIDTH};

    const DT: f32 = 1.0 / 60.0;
    const NONE: PlayerInput = PlayerInput {
        left: false,
        right: false,
        jump: false,
    };
    const RIGHT: PlayerInput = PlayerInput {
        left: false,
        right: true,
        jump: false,
    };
    const LEFT: PlayerInput = PlayerInput {
        left: true,
        right: false,
        jump: false,
    };
    const JUMP: PlayerInput = PlayerInput {
        left: false,
        right: false,
        jump: true,
    };

    fn flat_terrain() -> Terrain {
        Terrain {
            world_width: WORLD_WIDTH,
            floor_y: FLOOR_Y,
            platforms: Vec::new(),
        }
    }

    fn grounded_player(terrain: &Terrain) -> Player {
        let mut player = Player::new(PLAYER_SPAWN, PlayerConfig::default());
        player.step(NONE, DT, terrain);
        assert!(player.grounded);
        player
    }

    #[test]
    fn spawn_settles_on_floor_after_one_step() {
        let terrain = flat_terrain();
        let mut player = Player::new(PLAYER_SPAWN, PlayerConfig::default());
        player.step(NONE, DT, &terrain);
        assert_eq!(player.rect.bottom(), FLOOR_Y);
        assert_eq!(player.velocity_y, 0.0);
        assert!(player.grounded);
    }

    #[test]
    fn free_fall_gains_one_gravity_per_step() {
        let terrain = flat_terrain();
        let mut player = Player::new(Vec2::new(100.0, 100.0), PlayerConfig::default());
        player.step(NONE, DT, &terrain);
        assert_eq!(player.velocity_y, 0.5);
        assert_eq!(player.rect.y, 100.5);
        assert!(!player.grounded);

        player.step(NONE, DT, &terrain);
        assert_eq!(player.velocity_y, 1.0);
        assert_eq!(player.rect.y, 101.5);
    }

    #[test]
    fn running_right_five_steps_moves_25px() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        let start_x = player.rect.x;
        for _ in 0..5 {
            player.step(RIGHT, DT, &terrain);
        }
        assert_eq!(player.rect.x, start_x + 25.0);
        assert_eq!(player.facing, Facing::Right);
        assert_eq!(player.locomotion, Locomotion::Run);
        assert_eq!(player.sprite().frames(), RUN_RIGHT);
    }

    #[test]
    fn left_takes_priority_over_right() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        let start_x = player.rect.x;
        let both = PlayerInput {
            left: true,
            right: true,
            jump: false,
        };
        player.step(both, DT, &terrain);
        assert_eq!(player.rect.x, start_x - 5.0);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn releasing_direction_on_ground_goes_idle() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        player.step(LEFT, DT, &terrain);
        assert_eq!(player.locomotion, Locomotion::Run);
        player.step(NONE, DT, &terrain);
        assert_eq!(player.locomotion, Locomotion::Idle);
        assert_eq!(player.sprite().frames(), IDLE_LEFT);
    }

    #[test]
    fn jump_from_ground_applies_impulse() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        let jumped = player.step(JUMP, DT, &terrain);
        assert!(jumped);
        assert_eq!(player.velocity_y, -12.0 + 0.5);
        assert!(!player.grounded);
        assert_eq!(player.locomotion, Locomotion::Jump);
        assert_eq!(player.sprite().frames(), JUMP_RIGHT);
    }

    #[test]
    fn jump_only_activates_when_grounded() {
        let terrain = flat_terrain();
        let mut player = Player::new(Vec2::new(100.0, 100.0), PlayerConfig::default());
        player.velocity_y = 3.0;
        let jumped = player.step(JUMP, DT, &terrain);
        assert!(!jumped);
        assert_eq!(player.velocity_y, 3.5);
    }

    #[test]
    fn holding_jump_does_not_double_jump() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        assert!(player.step(JUMP, DT, &terrain));
        for _ in 0..10 {
            assert!(!player.step(JUMP, DT, &terrain));
            assert!(player.velocity_y > -12.0);
        }
    }

    #[test]
    fn held_jump_rejumps_after_landing() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        let mut jumps = 0;
        for _ in 0..120 {
            if player.step(JUMP, DT, &terrain) {
                jumps += 1;
            }
        }
        assert!(jumps >= 2);
    }

    #[test]
    fn lands_on_platform_from_above() {
        let platform = Rect::new(200.0, 450.0, 100.0, 20.0);
        let terrain = Terrain {
            platforms: vec![platform],
            ..flat_terrain()
        };
        let mut player = Player::new(Vec2::new(210.0, 450.0 - 27.0 - 1.0), PlayerConfig::default());
        player.velocity_y = 2.0;
        player.step(NONE, DT, &terrain);
        assert_eq!(player.rect.bottom(), 450.0);
        assert_eq!(player.velocity_y, 0.0);
        assert!(player.grounded);

        // Resting on the platform is stable.
        for _ in 0..10 {
            player.step(NONE, DT, &terrain);
            assert_eq!(player.rect.bottom(), 450.0);
            assert!(player.grounded);
        }
    }

    #[test]
    fn rising_through_platform_is_not_a_landing() {
        let platform = Rect::new(200.0, 450.0, 100.0, 20.0);
        let terrain = Terrain {
            platforms: vec![platform],
            ..flat_terrain()
        };
        // Head just below the platform, moving up fast.
        let mut player = Player::new(Vec2::new(210.0, 472.0), PlayerConfig::default());
        player.velocity_y = -10.0;
        player.step(NONE, DT, &terrain);
        assert!(player.rect.overlaps(&platform));
        assert!(!player.grounded);
        assert!(player.velocity_y < 0.0);
    }

    #[test]
    fn walking_into_platform_side_does_not_snag() {
        let platform = Rect::new(200.0, 530.0, 100.0, 20.0);
        let terrain = Terrain {
            platforms: vec![platform],
            ..flat_terrain()
        };
        let mut player = grounded_player(&terrain);
        player.teleport(Vec2::new(150.0 - 1.0, FLOOR_Y - PLAYER_HEIGHT));
        player.step(RIGHT, DT, &terrain);
        assert!(player.rect.overlaps(&platform));
        assert_eq!(player.rect.bottom(), FLOOR_Y);
    }

    #[test]
    fn highest_qualifying_platform_wins() {
        let low = Rect::new(200.0, 460.0, 100.0, 20.0);
        let high = Rect::new(220.0, 455.0, 100.0, 20.0);
        let terrain = Terrain {
            platforms: vec![high, low],
            ..flat_terrain()
        };
        let mut player = Player::new(Vec2::new(230.0, 455.0 - 27.0 - 1.0), PlayerConfig::default());
        player.velocity_y = 8.0;
        player.step(NONE, DT, &terrain);
        assert_eq!(player.rect.bottom(), 455.0);
        assert!(player.grounded);
    }

    #[test]
    fn walking_off_platform_edge_clears_grounded() {
        let platform = Rect::new(200.0, 450.0, 100.0, 20.0);
        let terrain = Terrain {
            platforms: vec![platform],
            ..flat_terrain()
        };
        let mut player = Player::new(Vec2::new(245.0, 450.0 - 27.0), PlayerConfig::default());
        player.step(NONE, DT, &terrain);
        assert!(player.grounded);

        for _ in 0..12 {
            player.step(RIGHT, DT, &terrain);
        }
        assert!(player.rect.left() > platform.right());
        assert!(!player.grounded);
        assert!(!player.step(JUMP, DT, &terrain));
    }

    #[test]
    fn horizontal_position_is_clamped_to_world() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        for _ in 0..100 {
            player.step(LEFT, DT, &terrain);
            assert!(player.rect.left() >= 0.0);
        }
        assert_eq!(player.rect.left(), 0.0);
        for _ in 0..400 {
            player.step(RIGHT, DT, &terrain);
            assert!(player.rect.right() <= WORLD_WIDTH);
        }
        assert_eq!(player.rect.right(), WORLD_WIDTH);
    }

    #[test]
    fn facing_change_swaps_and_restarts_animation() {
        let terrain = flat_terrain();
        let mut player = grounded_player(&terrain);
        for _ in 0..20 {
            player.step(RIGHT, DT, &terrain);
        }
        player.step(LEFT, DT, &terrain);
        assert_eq!(player.sprite().frames(), RUN_LEFT);
        assert_eq!(player.sprite().frame_index(), 0);
    }

    #[test]
    fn teleport_keeps_motion_but_respawn_clears_it() {
        let terrain = flat_terrain();
        let mut player = Player::new(Vec2::new(100.0, 100.0), PlayerConfig::default());
        player.step(NONE, DT, &terrain);
        player.teleport(PLAYER_SPAWN);
        assert_eq!(player.rect.position(), PLAYER_SPAWN);
        assert_eq!(player.velocity_y, 0.5);

        player.respawn(PLAYER_SPAWN);
        assert_eq!(player.velocity_y, 0.0);
        assert!(!player.grounded);
    }

    #[test]
    fn deterministic_sequence_reaches_same_final_state() {
        let terrain = Terrain::standard();
        let mut inputs = Vec::new();
        inputs.extend(std::iter::repeat(RIGHT).take(30));
        inputs.push(PlayerInput {
            left: false,
            right: true,
            jump: true,
        });
        inputs.extend(std::iter::repeat(RIGHT).take(40));
        inputs.extend(std::iter::repeat(LEFT).take(25));

        let mut run_a = Player::new(PLAYER_SPAWN, PlayerConfig::default());
        let mut run_b = Player::new(PLAYER_SPAWN, PlayerConfig::default());
        for input in &inputs {
            run_a.step(*input, DT, &terrain);
        }
        for input in &inputs {
            run_b.step(*input, DT, &terrain);
        }
        assert_eq!(run_a.rect, run_b.rect);
        assert_eq!(run_a.velocity_y, run_b.velocity_y);
        assert_eq!(run_a.grounded, run_b.grounded);
        assert_eq!(run_a.sprite().frame_index(), run_b.sprite().frame_index());
    }
}
