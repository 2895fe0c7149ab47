//! Gameplay tunables.
//!
//! Defaults reproduce the classic feel. A JSON file named by
//! `PIXEL_ADVENTURER_CONFIG` can override any subset of fields at start-up;
//! nothing is reloaded while the game runs.

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "PIXEL_ADVENTURER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Added to the player's vertical velocity once per step (pixels/step²).
    pub gravity: f32,
    /// Vertical velocity applied on jump; negative is upward.
    pub jump_strength: f32,
    /// Horizontal pixels per step while a direction is held.
    pub player_speed: f32,
    pub enemy_speed: f32,
    /// Seconds between collecting the last coin and the victory screen.
    pub victory_delay: f32,
    pub music_volume: f32,
    pub player_frame_secs: f32,
    pub enemy_frame_secs: f32,
    /// Length of one simulation step in seconds.
    pub fixed_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_strength: -12.0,
            player_speed: 5.0,
            enemy_speed: 2.0,
            victory_delay: 0.1,
            music_volume: 0.3,
            player_frame_secs: 0.2,
            enemy_frame_secs: 0.15,
            fixed_dt: 1.0 / 60.0,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load overrides from the file named by `PIXEL_ADVENTURER_CONFIG`, or fall
/// back to defaults when the variable is unset.
pub fn load_config_from_env() -> Result<GameConfig, String> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            let path = Path::new(&path);
            let config = load_config_from_path(path)?;
            log::info!("Config loaded from {}", path.display());
            Ok(config)
        }
        None => {
            log::info!("Using default config ({CONFIG_ENV_VAR} not set)");
            Ok(GameConfig::default())
        }
    }
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.gravity <= 0.0 {
        return Err("Config validation failed: gravity must be > 0".to_string());
    }
    if config.jump_strength >= 0.0 {
        return Err("Config validation failed: jump_strength must be < 0 (upward)".to_string());
    }
    let positives = [
        ("player_speed", config.player_speed),
        ("enemy_speed", config.enemy_speed),
        ("player_frame_secs", config.player_frame_secs),
        ("enemy_frame_secs", config.enemy_frame_secs),
        ("fixed_dt", config.fixed_dt),
    ];
    for (name, value) in positives {
        if value <= 0.0 {
            return Err(format!("Config validation failed: {name} must be > 0"));
        }
    }
    if config.victory_delay < 0.0 {
        return Err("Config validation failed: victory_delay must be >= 0".to_string());
    }
    if !(0.0..=1.0).contains(&config.music_volume) {
        return Err("Config validation failed: music_volume must be within [0, 1]".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pa_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn defaults_are_valid() {
        validate_config(&GameConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let path = temp_file_path("partial");
        fs::write(&path, r#"{ "gravity": 0.8, "music_volume": 0.0 }"#).expect("write temp file");

        let config = load_config_from_path(&path).expect("partial config should load");
        assert_eq!(config.gravity, 0.8);
        assert_eq!(config.music_volume, 0.0);
        assert_eq!(config.player_speed, GameConfig::default().player_speed);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let path = temp_file_path("unknown");
        fs::write(&path, r#"{ "gravty": 0.8 }"#).expect("write temp file");

        let err = load_config_from_path(&path).expect_err("typo should fail");
        assert!(err.contains("Failed to parse config JSON"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn downward_jump_is_rejected() {
        let path = temp_file_path("jump");
        fs::write(&path, r#"{ "jump_strength": 4.0 }"#).expect("write temp file");

        let err = load_config_from_path(&path).expect_err("positive jump should fail");
        assert!(err.contains("jump_strength"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = temp_file_path("missing");
        let err = load_config_from_path(&path).expect_err("missing file should fail");
        assert!(err.contains("Failed to read"));
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let config = GameConfig {
            music_volume: 1.5,
            ..GameConfig::default()
        };
        let err = validate_config(&config).expect_err("volume should fail");
        assert!(err.contains("music_volume"));
    }
}
