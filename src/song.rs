//! Scheduling of sheets onto a shared timeline.
//!
//! `Song::play` turns a sheet into timed, rendered notes. `Song::compose` overlays every
//! note additively into one master signal.
use crate::engrave;
use crate::error::{Result, SynthError};
use crate::instrument::Instrument;
use crate::signal::Signal;
use crate::synth_config::SynthConfig;
use crate::time;
use crate::tuning;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Pitches sounding within one beat, each `(pitch, amplitude)`.
pub type BeatGroup = Vec<(String, f64)>;
pub type Sheet = Vec<BeatGroup>;

/// A scheduled note. Times are in seconds.
#[derive(Clone, Debug)]
pub struct Note {
  pub name: String,
  pub amp: f64,
  pub start: f64,
  /// Duration of the instrument that played the note.
  pub time: f64,
  pub end: f64,
  /// Rendered note, amplitude applied. Empty until played.
  pub sig: Signal,
}

impl Note {
  pub fn new(name: &str, amp: f64, start: f64, time: f64) -> Note {
    Note { name: name.to_string(), amp, start, time, end: start + time, sig: Signal::default() }
  }

  fn with_signal(self, sig: Signal) -> Note {
    Note { sig, ..self }
  }
}

/// Builds a sheet from borrowed pitch names.
pub fn sheet(groups: &[&[(&str, f64)]]) -> Sheet {
  groups.iter().map(|g| g.iter().map(|(p, a)| (p.to_string(), *a)).collect()).collect()
}

pub struct Song {
  config: SynthConfig,
  notes: Vec<Note>,
  sig: Signal,
  composed: bool,
}

impl Song {
  pub fn new(config: SynthConfig) -> Song {
    Song { config, notes: Vec::new(), sig: Signal::default(), composed: false }
  }

  pub fn with_bpm(config: SynthConfig, bpm: f64) -> Song {
    Song::new(config.with_bpm(bpm))
  }

  pub fn seconds_per_beat(&self) -> f64 {
    self.config.seconds_per_beat()
  }

  pub fn config(&self) -> &SynthConfig {
    &self.config
  }

  pub fn notes(&self) -> &[Note] {
    &self.notes
  }

  /// The master signal. Empty until `compose` runs, and again after any later `play`.
  pub fn signal(&self) -> &Signal {
    &self.sig
  }

  pub fn is_composed(&self) -> bool {
    self.composed
  }

  /// Schedules every entry of `sheet` on `instrument` and renders it.
  ///
  /// Entries of beat `b` start at `(b + i/k) * seconds_per_beat` and all last
  /// `instrument.duration()`. The sheet is checked for unknown pitches before anything
  /// is rendered. A previously composed master signal is discarded.
  pub fn play(&mut self, instrument: &dyn Instrument, sheet: &[BeatGroup]) -> Result<()> {
    if let Some((pitch, _)) = sheet.iter().flatten().find(|(pitch, _)| !tuning::is_known(pitch)) {
      return Err(SynthError::UnknownPitch(pitch.clone()));
    }

    let spb = self.seconds_per_beat();
    let dur = instrument.duration();
    let scheduled: Vec<Note> = sheet
      .iter()
      .enumerate()
      .flat_map(|(b, group)| {
        let k = group.len();
        group.iter().enumerate().map(move |(i, (pitch, amp))| Note::new(pitch, *amp, time::beat_start(b, i, k, spb), dur))
      })
      .collect();

    let rendered = scheduled
      .into_par_iter()
      .map(|note| {
        let sig = instrument.play_note(&note)?;
        Ok(note.with_signal(sig))
      })
      .collect::<Result<Vec<Note>>>()?;

    debug!("Played {} notes over {} beats", rendered.len(), sheet.len());
    self.notes.extend(rendered);
    if self.composed {
      debug!("Discarding composed signal after play");
      self.sig = Signal::default();
      self.composed = false;
    }
    Ok(())
  }

  /// Overlays every note into a master signal of `floor(sample_rate * max_end)` frames.
  ///
  /// Notes reaching past the end of the master signal are cut at the boundary.
  pub fn compose(&mut self) -> &Signal {
    let end = self.notes.iter().map(|n| n.end).fold(0f64, f64::max);
    let mut master = Signal::silence(self.config.frames_of(end));
    for (index, note) in self.notes.iter().enumerate() {
      let offset = self.config.frames_of(note.start);
      for (i, sample) in note.sig.val.iter().enumerate() {
        match master.val.get_mut(offset + i) {
          Some(slot) => *slot += sample,
          None => {
            warn!(
              "Note {} ({}) truncated at frame {} of {}, master has {} frames",
              index,
              note.name,
              offset + i,
              offset + note.sig.len(),
              master.len()
            );
            break;
          }
        }
      }
    }
    self.sig = master;
    self.composed = true;
    &self.sig
  }

  /// Composes and writes the result as 16 bit mono PCM.
  pub fn render<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
    let (_, elapsed) = time::measure(|| {
      self.compose();
    });
    info!("Composed {} notes into {} frames in {:?}", self.notes.len(), self.sig.len(), elapsed);
    engrave::write_wav(path, &self.sig, &self.config)
  }
}
