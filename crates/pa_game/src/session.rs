//! One running game: the state machine, the level contents and the
//! per-step simulation and draw passes.
//!
//! The session owns everything that used to be process-wide (state, score,
//! sound flag). The host feeds it fixed steps, pointer events and a canvas;
//! audio goes through the `Audio` capability and is gated on `sound_on` here.

use std::fmt;

use glam::Vec2;
use pa_core::timer::OneShotTimer;
use pa_core::canvas::DEFAULT_TEXT_SIZE;
use pa_core::{Canvas, Rgb, TextAnchor};

use crate::audio::{Audio, Sfx};
use crate::button::{click_any, Button, UiAction};
use crate::coin::Coin;
use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::entity::{Entity, Tick};
use crate::level::{
    EnemySpawn, Terrain, COIN_POSITIONS, ENEMY_SPAWNS, PLAYER_SPAWN, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::player::{Player, PlayerConfig, PlayerInput};

pub const TITLE: &str = "Pixel Adventurer";
pub const HELP_TEXT: &str = "Use the arrow keys to move and space to jump";
pub const VICTORY_TEXT: &str = "You won!";

const BACKGROUND: Rgb = Rgb(50, 50, 80);
const VICTORY_BACKGROUND: Rgb = Rgb(30, 120, 60);
const PLATFORM_COLOR: Rgb = Rgb(100, 200, 100);
const GROUND_COLOR: Rgb = Rgb(150, 100, 50);
const HEADLINE_SIZE: f32 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    Victory,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Menu => "Menu",
            GameState::Playing => "Playing",
            GameState::Victory => "Victory",
        };
        f.write_str(name)
    }
}

fn sound_label(sound_on: bool) -> String {
    format!("Sound: {}", if sound_on { "ON" } else { "OFF" })
}

fn menu_buttons() -> Vec<Button> {
    let x = WORLD_WIDTH / 2.0 - 100.0;
    vec![
        Button::new(Vec2::new(x, 200.0), "Start Game", UiAction::StartGame),
        Button::new(Vec2::new(x, 280.0), sound_label(true), UiAction::ToggleSound),
        Button::new(Vec2::new(x, 360.0), "Exit", UiAction::Exit),
    ]
}

fn victory_buttons() -> Vec<Button> {
    let x = WORLD_WIDTH / 2.0 - 100.0;
    vec![Button::new(
        Vec2::new(x, 300.0),
        "Back to Menu",
        UiAction::ReturnToMenu,
    )]
}

fn play_cue(sound_on: bool, audio: &mut dyn Audio, sfx: Sfx) {
    if sound_on {
        audio.play_sfx(sfx);
    }
}

pub struct Session {
    state: GameState,
    sound_on: bool,
    score: u32,
    player: Player,
    spawn: Vec2,
    enemies: Vec<Enemy>,
    terrain: Terrain,
    coins: Vec<Coin>,
    menu_buttons: Vec<Button>,
    victory_buttons: Vec<Button>,
    victory_timer: OneShotTimer,
    // Arms the timer once per play session.
    victory_scheduled: bool,
    pointer: Vec2,
    exit_requested: bool,
    config: GameConfig,
}

impl Session {
    /// The built-in level.
    pub fn new(config: GameConfig) -> Self {
        Self::with_level(
            config,
            Terrain::standard(),
            PLAYER_SPAWN,
            &COIN_POSITIONS,
            &ENEMY_SPAWNS,
        )
    }

    pub fn with_level(
        config: GameConfig,
        terrain: Terrain,
        spawn: Vec2,
        coin_positions: &[Vec2],
        enemy_spawns: &[EnemySpawn],
    ) -> Self {
        let enemies = enemy_spawns
            .iter()
            .map(|s| Enemy::from_spawn(s, config.enemy_speed, config.enemy_frame_secs))
            .collect();
        Self {
            state: GameState::Menu,
            sound_on: true,
            score: 0,
            player: Player::new(spawn, PlayerConfig::from(&config)),
            spawn,
            enemies,
            terrain,
            coins: coin_positions.iter().copied().map(Coin::new).collect(),
            menu_buttons: menu_buttons(),
            victory_buttons: victory_buttons(),
            victory_timer: OneShotTimer::new(),
            victory_scheduled: false,
            pointer: Vec2::ZERO,
            exit_requested: false,
            config,
        }
    }

    /// Apply the configured music volume and start music if sound is on.
    pub fn start_audio(&self, audio: &mut dyn Audio) {
        audio.set_music_volume(self.config.music_volume);
        if self.sound_on {
            audio.play_music();
        }
    }

    /// One simulation step. Does nothing outside `Playing`.
    pub fn update(&mut self, dt: f32, input: PlayerInput, audio: &mut dyn Audio) {
        if self.state != GameState::Playing {
            return;
        }

        if self.victory_timer.tick(dt) {
            self.set_state(GameState::Victory);
            return;
        }

        let tick = Tick {
            dt,
            input,
            terrain: &self.terrain,
        };
        if let Some(sfx) = self.player.update(&tick) {
            log::debug!("Jump at ({:.1}, {:.1})", self.player.rect.x, self.player.rect.y);
            play_cue(self.sound_on, audio, sfx);
        }
        for enemy in &mut self.enemies {
            if let Some(sfx) = enemy.update(&tick) {
                play_cue(self.sound_on, audio, sfx);
            }
        }

        for enemy in &self.enemies {
            if enemy.bounds().overlaps(&self.player.rect) {
                log::debug!("Player hit by enemy at x={:.1}", enemy.rect.x);
                play_cue(self.sound_on, audio, Sfx::Hit);
                self.player.teleport(self.spawn);
            }
        }

        for coin in &mut self.coins {
            if !coin.is_collected() && coin.rect.overlaps(&self.player.rect) && coin.collect() {
                self.score += 1;
                log::debug!("Coin collected (score {})", self.score);
                play_cue(self.sound_on, audio, Sfx::Coin);
            }
        }

        if !self.victory_scheduled && self.all_coins_collected() {
            self.victory_scheduled = true;
            self.victory_timer.arm(self.config.victory_delay);
            log::info!(
                "All coins collected, victory in {:.2}s",
                self.config.victory_delay
            );
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = position;
    }

    /// Deliver one pointer press. Only the buttons of the current screen
    /// respond; nothing is clickable while playing.
    pub fn pointer_pressed(&mut self, position: Vec2, audio: &mut dyn Audio) {
        self.pointer = position;
        let action = match self.state {
            GameState::Menu => click_any(&self.menu_buttons, position),
            GameState::Victory => click_any(&self.victory_buttons, position),
            GameState::Playing => None,
        };
        if let Some(action) = action {
            self.apply(action, audio);
        }
    }

    pub fn apply(&mut self, action: UiAction, audio: &mut dyn Audio) {
        match action {
            UiAction::StartGame => {
                if self.state == GameState::Menu {
                    self.set_state(GameState::Playing);
                }
            }
            UiAction::ToggleSound => self.toggle_sound(audio),
            UiAction::Exit => self.request_exit(),
            UiAction::ReturnToMenu => {
                if self.state == GameState::Victory {
                    self.return_to_menu();
                }
            }
        }
    }

    pub fn toggle_sound(&mut self, audio: &mut dyn Audio) {
        self.sound_on = !self.sound_on;
        let label = sound_label(self.sound_on);
        for button in &mut self.menu_buttons {
            if button.action == UiAction::ToggleSound {
                button.label.clone_from(&label);
            }
        }
        if self.sound_on {
            audio.play_music();
        } else {
            audio.stop_music();
        }
        log::info!("{label}");
    }

    /// Back to the menu with coins, score and the player reset. Enemies keep
    /// patrolling from wherever they are.
    pub fn return_to_menu(&mut self) {
        for coin in &mut self.coins {
            coin.reset();
        }
        self.score = 0;
        self.player.respawn(self.spawn);
        self.victory_timer = OneShotTimer::new();
        self.victory_scheduled = false;
        self.set_state(GameState::Menu);
    }

    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            log::info!("Exit requested");
        }
        self.exit_requested = true;
    }

    fn set_state(&mut self, next: GameState) {
        if self.state != next {
            log::info!("Game state: {} -> {}", self.state, next);
            self.state = next;
        }
    }

    fn all_coins_collected(&self) -> bool {
        self.coins.iter().all(Coin::is_collected)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(BACKGROUND);
        match self.state {
            GameState::Menu => {
                canvas.draw_text(
                    TITLE,
                    TextAnchor::Center(Vec2::new(WORLD_WIDTH / 2.0, 100.0)),
                    HEADLINE_SIZE,
                    Rgb::WHITE,
                );
                for button in &self.menu_buttons {
                    button.draw(canvas, self.pointer);
                }
            }
            GameState::Playing => {
                for platform in &self.terrain.platforms {
                    canvas.fill_rect(*platform, PLATFORM_COLOR);
                }
                canvas.fill_rect(self.terrain.ground_rect(WORLD_HEIGHT), GROUND_COLOR);
                self.player.draw(canvas);
                for enemy in &self.enemies {
                    enemy.draw(canvas);
                }
                for coin in &self.coins {
                    coin.draw(canvas);
                }
                canvas.draw_text(
                    &format!("Coins: {}", self.score),
                    TextAnchor::TopLeft(Vec2::new(10.0, 40.0)),
                    DEFAULT_TEXT_SIZE,
                    Rgb::YELLOW,
                );
                canvas.draw_text(
                    HELP_TEXT,
                    TextAnchor::TopLeft(Vec2::new(10.0, 10.0)),
                    DEFAULT_TEXT_SIZE,
                    Rgb::WHITE,
                );
            }
            GameState::Victory => {
                canvas.clear(VICTORY_BACKGROUND);
                canvas.draw_text(
                    VICTORY_TEXT,
                    TextAnchor::Center(Vec2::new(WORLD_WIDTH / 2.0, 150.0)),
                    HEADLINE_SIZE,
                    Rgb::WHITE,
                );
                for button in &self.victory_buttons {
                    button.draw(canvas, self.pointer);
                }
            }
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn menu_buttons(&self) -> &[Button] {
        &self.menu_buttons
    }

    pub fn victory_pending(&self) -> bool {
        self.victory_timer.is_armed()
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
