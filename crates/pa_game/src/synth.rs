//! Tone synthesiser behind the `Audio` capability.
//!
//! Sound effects are short pitch sweeps; the background track is a looping
//! square-wave melody. Mixing happens on the cpal callback thread from a
//! `MixerState` shared through a mutex. When no output device can be opened
//! the synth keeps its state but produces nothing.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio::{Audio, Sfx};

const MAX_VOICES: usize = 8;
const SFX_GAIN: f32 = 0.25;
const MUSIC_GAIN: f32 = 0.12;
const NOTE_SECS: f32 = 0.25;

/// MIDI notes of the background loop; 0 is a rest.
const MELODY: &[u8] = &[
    60, 64, 67, 72, 67, 64, 60, 0, 62, 65, 69, 74, 69, 65, 62, 0, 64, 67, 71, 76, 71, 67, 64, 0,
    65, 64, 62, 60, 62, 64, 60, 0,
];

fn midi_to_hz(note: u8) -> f32 {
    440.0 * 2f32.powf((note as f32 - 69.0) / 12.0)
}

/// (start Hz, end Hz, seconds)
fn sweep_for(sfx: Sfx) -> (f32, f32, f32) {
    match sfx {
        Sfx::Jump => (300.0, 600.0, 0.15),
        Sfx::Coin => (988.0, 1319.0, 0.12),
        Sfx::Hit => (200.0, 80.0, 0.25),
    }
}

#[derive(Debug, Clone)]
struct Voice {
    freq_start: f32,
    freq_end: f32,
    length: u32,
    position: u32,
    phase: f32,
}

impl Voice {
    fn new(sfx: Sfx, sample_rate: f32) -> Self {
        let (freq_start, freq_end, secs) = sweep_for(sfx);
        Self {
            freq_start,
            freq_end,
            length: (secs * sample_rate).max(1.0) as u32,
            position: 0,
            phase: 0.0,
        }
    }

    fn is_done(&self) -> bool {
        self.position >= self.length
    }

    fn next_sample(&mut self, sample_rate: f32) -> f32 {
        if self.is_done() {
            return 0.0;
        }
        let t = self.position as f32 / self.length as f32;
        let freq = self.freq_start + (self.freq_end - self.freq_start) * t;
        self.phase = (self.phase + freq / sample_rate).fract();
        self.position += 1;
        // Triangle wave with a linear fade-out.
        let triangle = 4.0 * (self.phase - 0.5).abs() - 1.0;
        triangle * (1.0 - t) * SFX_GAIN
    }
}

#[derive(Debug, Clone, Default)]
struct MusicCursor {
    note_index: usize,
    sample_in_note: u32,
    phase: f32,
}

#[derive(Debug, Clone)]
pub struct MixerState {
    sample_rate: f32,
    voices: Vec<Voice>,
    music: Option<MusicCursor>,
    music_volume: f32,
}

impl MixerState {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            voices: Vec::with_capacity(MAX_VOICES),
            music: None,
            music_volume: 1.0,
        }
    }

    pub fn trigger(&mut self, sfx: Sfx) {
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(Voice::new(sfx, self.sample_rate));
    }

    pub fn start_music(&mut self) {
        self.music = Some(MusicCursor::default());
    }

    pub fn stop_music(&mut self) {
        self.music = None;
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn music_playing(&self) -> bool {
        self.music.is_some()
    }

    /// Fill an interleaved buffer with `channels` channels per frame.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let note_len = (NOTE_SECS * self.sample_rate) as u32;
        for frame in out.chunks_mut(channels) {
            let mut mix = 0.0;
            for voice in &mut self.voices {
                mix += voice.next_sample(self.sample_rate);
            }
            if let Some(cursor) = &mut self.music {
                mix += next_music_sample(cursor, self.sample_rate, note_len) * self.music_volume;
            }
            let mix = mix.clamp(-1.0, 1.0);
            for sample in frame.iter_mut() {
                *sample = mix;
            }
        }
        self.voices.retain(|voice| !voice.is_done());
    }
}

fn next_music_sample(cursor: &mut MusicCursor, sample_rate: f32, note_len: u32) -> f32 {
    let note = MELODY[cursor.note_index];
    let sample = if note == 0 {
        0.0
    } else {
        cursor.phase = (cursor.phase + midi_to_hz(note) / sample_rate).fract();
        // Short release at the end of each note so notes don't click together.
        let remaining = note_len.saturating_sub(cursor.sample_in_note) as f32;
        let release = (remaining / (note_len as f32 * 0.2)).min(1.0);
        let square = if cursor.phase < 0.5 { 1.0 } else { -1.0 };
        square * release * MUSIC_GAIN
    };
    cursor.sample_in_note += 1;
    if cursor.sample_in_note >= note_len {
        cursor.sample_in_note = 0;
        cursor.note_index = (cursor.note_index + 1) % MELODY.len();
    }
    sample
}

pub struct SynthAudio {
    state: Arc<Mutex<MixerState>>,
    // Kept alive for as long as sound should play.
    _stream: Option<cpal::Stream>,
}

impl SynthAudio {
    /// Open the default output device. Falls back to a silent synth when no
    /// device or stream is available.
    pub fn new() -> Self {
        match open_stream() {
            Ok((state, stream)) => Self {
                state,
                _stream: Some(stream),
            },
            Err(e) => {
                log::warn!("Audio disabled: {e}");
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self {
            state: Arc::new(Mutex::new(MixerState::new(44_100))),
            _stream: None,
        }
    }

    pub fn is_silent(&self) -> bool {
        self._stream.is_none()
    }

    fn with_mixer(&self, f: impl FnOnce(&mut MixerState)) {
        match self.state.lock() {
            Ok(mut mixer) => f(&mut mixer),
            Err(_) => log::warn!("Audio mixer lock poisoned; dropping command"),
        }
    }
}

fn open_stream() -> Result<(Arc<Mutex<MixerState>>, cpal::Stream), String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| "no default output device".to_string())?;
    let supported = device
        .default_output_config()
        .map_err(|e| format!("Failed to query output config: {e}"))?;
    let config: cpal::StreamConfig = supported.config();
    let channels = config.channels as usize;

    let state = Arc::new(Mutex::new(MixerState::new(config.sample_rate.0)));
    let callback_state = Arc::clone(&state);
    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match callback_state.lock() {
                Ok(mut mixer) => mixer.render(data, channels),
                Err(_) => data.fill(0.0),
            },
            |err| log::warn!("Audio stream error: {err}"),
            None,
        )
        .map_err(|e| format!("Failed to build output stream: {e}"))?;
    stream
        .play()
        .map_err(|e| format!("Failed to start output stream: {e}"))?;

    log::info!(
        "Audio output: {} Hz, {} channel(s)",
        config.sample_rate.0,
        channels
    );
    Ok((state, stream))
}

impl Audio for SynthAudio {
    fn play_sfx(&mut self, sfx: Sfx) {
        self.with_mixer(|mixer| mixer.trigger(sfx));
    }

    fn play_music(&mut self) {
        self.with_mixer(MixerState::start_music);
    }

    fn stop_music(&mut self) {
        self.with_mixer(MixerState::stop_music);
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.with_mixer(|mixer| mixer.set_music_volume(volume));
    }
}
