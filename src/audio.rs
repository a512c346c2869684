//! Tone synthesis and playback.
//!
//! Every sound is synthesized in-process as a 16-bit PCM stereo WAV
//! buffer with the stereo panning baked into the channel gains, then
//! handed to the audio device. The three ambient tones loop at fixed
//! pans; the target beep exists once per sector so its pan can follow
//! the classified direction.

use crate::config;
use crate::player::Direction;
use log::warn;
use macroquad::audio::{
    PlaySoundParams, Sound, load_sound_from_bytes, play_sound, play_sound_once, set_sound_volume,
};
use std::f64::consts::TAU;

/// Notes of the C major scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleNote {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl ScaleNote {
    /// Frequency in the third octave, Hz.
    pub fn c3_frequency(self) -> f64 {
        match self {
            ScaleNote::C => 131.0,
            ScaleNote::D => 147.0,
            ScaleNote::E => 165.0,
            ScaleNote::F => 175.0,
            ScaleNote::G => 196.0,
            ScaleNote::A => 220.0,
            ScaleNote::B => 247.0,
        }
    }

    /// Frequency in the fourth octave, Hz.
    pub fn c4_frequency(self) -> f64 {
        match self {
            ScaleNote::C => 262.0,
            ScaleNote::D => 294.0,
            ScaleNote::E => 330.0,
            ScaleNote::F => 349.0,
            ScaleNote::G => 392.0,
            ScaleNote::A => 440.0,
            ScaleNote::B => 494.0,
        }
    }
}

/// Ambient sector volumes plus the optional target cue, produced by the
/// scan loop on an audio-mix tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMix {
    pub left: f32,
    pub center: f32,
    pub right: f32,
    pub target: Option<TargetCue>,
}

/// Pan and volume for the target beep while the player faces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCue {
    pub direction: Direction,
    pub volume: f32,
}

/// Volume for the closest obstacle in a sector: linear falloff over
/// `max_distance`, scaled to the tone ceiling. Distances beyond
/// `max_distance` (including the empty-sector sentinel) come out
/// negative and are clamped to silence when applied.
pub fn distance_to_volume(distance: f64, max_distance: f64) -> f32 {
    (1.0 - distance / max_distance) as f32 * config::MAX_VOLUME
}

const TONE_AMPLITUDE: f32 = 0.8;
const BEEP_SAMPLES: usize = 5000;

fn write_sample(bytes: &mut Vec<u8>, value: f32) {
    let scaled = (value.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
    bytes.extend_from_slice(&scaled.to_le_bytes());
}

// 16-bit PCM stereo WAV container around interleaved sample frames.
fn stereo_wav(frames: &[(f32, f32)]) -> Vec<u8> {
    let data_len = (frames.len() * 4) as u32;
    let mut bytes = Vec::with_capacity(44 + frames.len() * 4);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&2u16.to_le_bytes()); // stereo
    bytes.extend_from_slice(&config::SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(config::SAMPLE_RATE * 4).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&4u16.to_le_bytes()); // frame size
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for &(left, right) in frames {
        write_sample(&mut bytes, left);
        write_sample(&mut bytes, right);
    }
    bytes
}

/// One second of sine tone, panned by scaling the channel gains:
/// left = 1 - panning, right = panning.
fn sine_tone(frequency: f64, panning: f32) -> Vec<u8> {
    let frames: Vec<(f32, f32)> = (0..config::SAMPLE_RATE)
        .map(|n| {
            let sample = TONE_AMPLITUDE
                * (TAU * frequency * n as f64 / config::SAMPLE_RATE as f64).sin() as f32;
            ((1.0 - panning) * sample, panning * sample)
        })
        .collect();
    stereo_wav(&frames)
}

/// A one-second loop that beeps: a short burst completing `frequency`
/// full cycles over its own window, then silence.
fn beep_tone(frequency: f64, panning: f32) -> Vec<u8> {
    let mut frames = vec![(0.0f32, 0.0f32); config::SAMPLE_RATE as usize];
    for (n, frame) in frames.iter_mut().enumerate().take(BEEP_SAMPLES) {
        let sample =
            TONE_AMPLITUDE * (TAU * frequency * n as f64 / BEEP_SAMPLES as f64).sin() as f32;
        *frame = ((1.0 - panning) * sample, panning * sample);
    }
    stereo_wav(&frames)
}

/// Center-panned note sequence for the terminal one-shots, with a
/// linear fade per note to avoid clicks.
fn jingle(frequencies: &[f64], note_seconds: f64) -> Vec<u8> {
    let note_len = (note_seconds * config::SAMPLE_RATE as f64) as usize;
    let mut frames = Vec::with_capacity(note_len * frequencies.len());
    for &frequency in frequencies {
        for n in 0..note_len {
            let fade = 1.0 - n as f32 / note_len as f32;
            let sample = TONE_AMPLITUDE
                * fade
                * (TAU * frequency * n as f64 / config::SAMPLE_RATE as f64).sin() as f32;
            frames.push((0.5 * sample, 0.5 * sample));
        }
    }
    stereo_wav(&frames)
}

async fn load_tone(bytes: Vec<u8>, label: &str) -> Option<Sound> {
    load_sound_from_bytes(&bytes)
        .await
        .map_err(|e| {
            warn!("Failed to prepare {}: {}", label, e);
            e
        })
        .ok()
}

fn set_tone_volume(sound: &Option<Sound>, volume: f32) {
    if let Some(sound) = sound {
        set_sound_volume(sound, volume.clamp(0.0, config::MAX_VOLUME));
    }
}

/// Owns every sound the game plays: three looped ambient tones, three
/// pre-panned variants of the target beep, and the two terminal
/// one-shots. Any tone that fails to load degrades to silence.
#[derive(Default)]
pub struct AudioManager {
    left_tone: Option<Sound>,
    center_tone: Option<Sound>,
    right_tone: Option<Sound>,
    target_left: Option<Sound>,
    target_center: Option<Sound>,
    target_right: Option<Sound>,
    completion_sound: Option<Sound>,
    game_over_sound: Option<Sound>,
}

impl AudioManager {
    pub fn new() -> Self {
        Default::default()
    }

    // Synthesize and register all sound buffers
    pub async fn load(&mut self) {
        self.left_tone = load_tone(
            sine_tone(ScaleNote::D.c3_frequency(), Direction::Left.panning()),
            "left tone",
        )
        .await;
        self.center_tone = load_tone(
            sine_tone(ScaleNote::E.c4_frequency(), Direction::Center.panning()),
            "center tone",
        )
        .await;
        self.right_tone = load_tone(
            sine_tone(ScaleNote::C.c3_frequency(), Direction::Right.panning()),
            "right tone",
        )
        .await;

        let beep_frequency = ScaleNote::B.c3_frequency();
        self.target_left = load_tone(
            beep_tone(beep_frequency, Direction::Left.panning()),
            "target beep (left)",
        )
        .await;
        self.target_center = load_tone(
            beep_tone(beep_frequency, Direction::Center.panning()),
            "target beep (center)",
        )
        .await;
        self.target_right = load_tone(
            beep_tone(beep_frequency, Direction::Right.panning()),
            "target beep (right)",
        )
        .await;

        self.completion_sound = load_tone(
            jingle(
                &[
                    ScaleNote::C.c4_frequency(),
                    ScaleNote::E.c4_frequency(),
                    ScaleNote::G.c4_frequency(),
                    ScaleNote::B.c4_frequency(),
                ],
                0.18,
            ),
            "completion jingle",
        )
        .await;
        self.game_over_sound = load_tone(
            jingle(
                &[
                    ScaleNote::A.c3_frequency(),
                    ScaleNote::F.c3_frequency(),
                    ScaleNote::C.c3_frequency(),
                ],
                0.25,
            ),
            "game over jingle",
        )
        .await;
    }

    /// Start every continuous tone looping at zero volume.
    pub fn start(&self) {
        for sound in [
            &self.left_tone,
            &self.center_tone,
            &self.right_tone,
            &self.target_left,
            &self.target_center,
            &self.target_right,
        ]
        .into_iter()
        .flatten()
        {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: true,
                    volume: 0.0,
                },
            );
        }
    }

    /// Apply one mix tick: sector volumes for the ambient tones and the
    /// target cue (or target silence).
    pub fn apply_mix(&self, mix: &AudioMix) {
        set_tone_volume(&self.left_tone, mix.left);
        set_tone_volume(&self.center_tone, mix.center);
        set_tone_volume(&self.right_tone, mix.right);

        match mix.target {
            Some(cue) => self.set_target_cue(cue.direction, cue.volume),
            None => self.mute_target(),
        }

        crate::debug_audio!(
            "mix: left {:.3} center {:.3} right {:.3} target {:?}",
            mix.left,
            mix.center,
            mix.right,
            mix.target
        );
    }

    // Only the variant panned toward the target's sector is audible.
    fn set_target_cue(&self, direction: Direction, volume: f32) {
        for (variant, sound) in [
            (Direction::Left, &self.target_left),
            (Direction::Center, &self.target_center),
            (Direction::Right, &self.target_right),
        ] {
            let tone_volume = if variant == direction { volume } else { 0.0 };
            set_tone_volume(sound, tone_volume);
        }
    }

    fn mute_target(&self) {
        self.set_target_cue(Direction::Center, 0.0);
    }

    /// Silence every continuous tone.
    pub fn silence(&self) {
        set_tone_volume(&self.left_tone, 0.0);
        set_tone_volume(&self.center_tone, 0.0);
        set_tone_volume(&self.right_tone, 0.0);
        self.mute_target();
    }

    /// Mute the tones and fire the level-complete jingle.
    pub fn play_completion(&self) {
        self.silence();
        if let Some(ref sound) = self.completion_sound {
            play_sound_once(sound);
        }
    }

    /// Mute the tones and fire the game-over jingle.
    pub fn play_game_over(&self) {
        self.silence();
        if let Some(ref sound) = self.game_over_sound {
            play_sound_once(sound);
        }
    }
}
