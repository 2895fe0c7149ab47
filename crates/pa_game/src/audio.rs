//! Audio capability consumed by the game.
//!
//! Calls are fire-and-forget. Whether sound is enabled is the session's
//! concern; implementations play whatever they are asked to.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Jump,
    Coin,
    Hit,
}

pub trait Audio {
    fn play_sfx(&mut self, sfx: Sfx);
    /// Start the looping background track (restart if already playing).
    fn play_music(&mut self);
    fn stop_music(&mut self);
    /// Music volume in [0, 1].
    fn set_music_volume(&mut self, volume: f32);
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Sfx(Sfx),
    PlayMusic,
    StopMusic,
    Volume(f32),
}

/// Test double that records every call in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

#[cfg(test)]
impl RecordingAudio {
    pub fn sfx_count(&self, sfx: Sfx) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == AudioCall::Sfx(sfx))
            .count()
    }
}

#[cfg(test)]
impl Audio for RecordingAudio {
    fn play_sfx(&mut self, sfx: Sfx) {
        self.calls.push(AudioCall::Sfx(sfx));
    }

    fn play_music(&mut self) {
        self.calls.push(AudioCall::PlayMusic);
    }

    fn stop_music(&mut self) {
        self.calls.push(AudioCall::StopMusic);
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.calls.push(AudioCall::Volume(volume));
    }
}
