use crate::synth::{frames_of, DEFAULT_BPM, PCM_FULL_SCALE, PCM_HEADROOM, SRu};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Immutable render settings shared by songs, instruments and the encoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: u32,
    pub full_scale: f64,
    pub headroom: f64,
    pub bpm: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: SRu,
            full_scale: PCM_FULL_SCALE,
            headroom: PCM_HEADROOM,
            bpm: DEFAULT_BPM,
        }
    }
}

impl SynthConfig {
    /// Defaults overridden by `RAUDIO_SAMPLE_RATE`, `RAUDIO_HEADROOM` and `RAUDIO_BPM`,
    /// read from the process environment after loading any `.env` file.
    pub fn from_env() -> SynthConfig {
        dotenv::dotenv().ok();
        let base = SynthConfig::default();
        SynthConfig {
            sample_rate: env_or("RAUDIO_SAMPLE_RATE", base.sample_rate),
            headroom: env_or("RAUDIO_HEADROOM", base.headroom),
            bpm: env_or("RAUDIO_BPM", base.bpm),
            ..base
        }
    }

    pub fn with_bpm(self, bpm: f64) -> SynthConfig {
        SynthConfig { bpm, ..self }
    }

    pub fn seconds_per_beat(&self) -> f64 {
        60f64 / self.bpm
    }

    pub fn frames_of(&self, seconds: f64) -> usize {
        frames_of(self.sample_rate, seconds)
    }

    pub fn sample_rate_f(&self) -> f64 {
        self.sample_rate as f64
    }
}

fn env_or<T: FromStr + Copy>(key: &str, fallback: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring unparseable {}={:?}", key, raw);
                fallback
            }
        },
        Err(_) => fallback,
    }
}
