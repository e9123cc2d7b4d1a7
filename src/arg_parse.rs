use crate::error::{Result, SynthError};
use crate::instrument::FmInstrument;
use crate::presets;
use crate::song::{sheet, Sheet, Song};
use crate::synth_config::SynthConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

fn default_pluck_dur() -> f64 {
    0.5
}

/// Instrument declaration in a playbook. Frequencies in Hz, times in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetSpec {
    Gong {
        fc: f64,
        fm: f64,
        i0: f64,
        dur: f64,
        amp_tau: f64,
        ind_tau: f64,
    },
    Pluck {
        theta: f64,
        a0: f64,
        a1: f64,
        beta: f64,
        #[serde(default = "default_pluck_dur")]
        dur: f64,
    },
    PluckEnv2 {
        theta: f64,
        a0: f64,
        a1: f64,
        beta: f64,
        dur: f64,
    },
}

impl PresetSpec {
    pub fn build(&self, config: SynthConfig) -> FmInstrument {
        match *self {
            PresetSpec::Gong { fc, fm, i0, dur, amp_tau, ind_tau } => {
                presets::gong_like(config, fc, fm, i0, dur, amp_tau, ind_tau)
            }
            PresetSpec::Pluck { theta, a0, a1, beta, dur } => presets::pluck(config, theta, a0, a1, beta, dur),
            PresetSpec::PluckEnv2 { theta, a0, a1, beta, dur } => presets::pluck_env2(config, theta, a0, a1, beta, dur),
        }
    }
}

/// One instrument playing one sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    pub instrument: String,
    pub sheet: Sheet,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Playbook {
    pub bpm: f64,
    pub instruments: BTreeMap<String, PresetSpec>,
    pub parts: Vec<Part>,
}

impl Playbook {
    /// Plays every part in order on a fresh song at the playbook's tempo.
    ///
    /// Each declared instrument is built once, so parts sharing an instrument share its
    /// render cache.
    pub fn perform(&self, config: SynthConfig) -> Result<Song> {
        let config = config.with_bpm(self.bpm);
        for part in &self.parts {
            if !self.instruments.contains_key(&part.instrument) {
                return Err(SynthError::UnknownInstrument(part.instrument.clone()));
            }
        }
        let instruments: BTreeMap<&str, FmInstrument> =
            self.instruments.iter().map(|(name, spec)| (name.as_str(), spec.build(config))).collect();

        let mut song = Song::new(config);
        for part in &self.parts {
            let inst = instruments
                .get(part.instrument.as_str())
                .ok_or_else(|| SynthError::UnknownInstrument(part.instrument.clone()))?;
            song.play(inst, &part.sheet)?;
            info!("Played part on '{}' ({} beats)", part.instrument, part.sheet.len());
        }
        Ok(song)
    }
}

pub fn parse_playbook(json: &str) -> Result<Playbook> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_playbook<P: AsRef<Path>>(path: P) -> Result<Playbook> {
    parse_playbook(&fs::read_to_string(path)?)
}

pub fn hot_cross_buns() -> Sheet {
    let phrase: &[(&str, f64)] = &[("b4", 1.0), ("a4", 1.0), ("g4", 1.0), ("r", 1.0)];
    sheet(&[
        phrase,
        phrase,
        &[("b4", 1.0), ("b4", 1.0), ("b4", 1.0), ("b4", 1.0), ("g4", 1.0), ("g4", 1.0), ("g4", 1.0), ("g4", 1.0)],
        phrase,
    ])
}

/// A pluck and a gong layered over the same melody at 30 BPM.
pub fn demo_playbook() -> Playbook {
    let instruments = BTreeMap::from([
        ("pluck".to_string(), PresetSpec::Pluck { theta: 700.0, a0: 5.0, a1: 2.5, beta: 700.0, dur: 0.5 }),
        (
            "gong".to_string(),
            PresetSpec::Gong { fc: 85.0, fm: 65.0, i0: 15.0, dur: 2.0, amp_tau: 0.25, ind_tau: 0.5 },
        ),
    ]);
    let parts = vec![
        Part { instrument: "pluck".to_string(), sheet: hot_cross_buns() },
        Part { instrument: "gong".to_string(), sheet: hot_cross_buns() },
    ];
    Playbook { bpm: 30.0, instruments, parts }
}
