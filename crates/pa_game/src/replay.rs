use crate::player::PlayerInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<PlayerInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let input = PlayerInput {
                left: frame.left,
                right: frame.right,
                jump: frame.jump,
            };
            out.extend(std::iter::repeat(input).take(frame.repeat.max(1) as usize));
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{RecordingAudio, Sfx};
    use crate::button::UiAction;
    use crate::config::GameConfig;
    use crate::session::{GameState, Session};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "pa_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn run_session(replay: &ReplaySequence) -> (Session, RecordingAudio) {
        let mut session = Session::new(GameConfig::default());
        let mut audio = RecordingAudio::default();
        session.apply(UiAction::StartGame, &mut audio);
        for input in replay.expanded_inputs() {
            session.update(replay.fixed_dt, input, &mut audio);
        }
        (session, audio)
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "right": true, "repeat": 3 },
                { "jump": true }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert!(expanded[0].right && !expanded[0].left);
        assert!(expanded[3].jump);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_replay_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn session_replay_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "frames": [
                { "repeat": 10 },
                { "right": true, "repeat": 20 },
                { "right": true, "jump": true },
                { "right": true, "repeat": 40 },
                { "left": true, "jump": true, "repeat": 30 },
                { "repeat": 60 },
                { "right": true, "repeat": 120 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let (run_a, audio_a) = run_session(&replay);
        let (run_b, audio_b) = run_session(&replay);

        assert_eq!(run_a.player().rect, run_b.player().rect);
        assert_eq!(run_a.player().velocity_y, run_b.player().velocity_y);
        assert_eq!(run_a.player().grounded, run_b.player().grounded);
        assert_eq!(run_a.score(), run_b.score());
        assert_eq!(run_a.state(), run_b.state());
        for (a, b) in run_a.enemies().iter().zip(run_b.enemies()) {
            assert_eq!(a.rect, b.rect);
        }
        assert_eq!(audio_a.calls, audio_b.calls);
        assert!(audio_a.sfx_count(Sfx::Jump) >= 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_respects_world_bounds() {
        let replay = ReplaySequence {
            fixed_dt: default_dt(),
            frames: vec![
                ReplayFrame {
                    left: true,
                    right: false,
                    jump: true,
                    repeat: 300,
                },
                ReplayFrame {
                    left: false,
                    right: true,
                    jump: false,
                    repeat: 400,
                },
            ],
        };
        let mut session = Session::new(GameConfig::default());
        let mut audio = RecordingAudio::default();
        session.apply(UiAction::StartGame, &mut audio);
        for input in replay.expanded_inputs() {
            session.update(replay.fixed_dt, input, &mut audio);
            if session.state() != GameState::Playing {
                break;
            }
            let rect = session.player().rect;
            assert!(rect.left() >= 0.0 && rect.right() <= 800.0);
        }
    }
}
