use crate::error::Result;
use crate::gen::{self, ModParam};
use crate::signal::Signal;
use crate::song::Note;
use crate::synth_config::SynthConfig;
use crate::tuning;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Renders notes into signals. Every note played by one instrument lasts `duration` seconds.
pub trait Instrument: Sync {
  fn duration(&self) -> f64;

  /// The note's signal with its amplitude applied.
  fn play_note(&self, note: &Note) -> Result<Signal>;
}

/// FM voice with per-frame carrier, depth and modulator parameters.
///
/// Rendered waveforms (fm times envelope, before amplitude) are cached per pitch for the
/// lifetime of the instrument.
pub struct FmInstrument {
  pub theta: ModParam,
  pub alpha: ModParam,
  pub beta: ModParam,
  pub env: Signal,
  pub dur: f64,
  config: SynthConfig,
  cache: Mutex<HashMap<String, Arc<Signal>>>,
}

impl FmInstrument {
  pub fn new(
    config: SynthConfig, theta: impl Into<ModParam>, alpha: impl Into<ModParam>, beta: impl Into<ModParam>,
    env: Signal, dur: f64,
  ) -> FmInstrument {
    FmInstrument {
      theta: theta.into(),
      alpha: alpha.into(),
      beta: beta.into(),
      env,
      dur,
      config,
      cache: Mutex::new(HashMap::new()),
    }
  }

  pub fn frames(&self) -> usize {
    self.config.frames_of(self.dur)
  }

  pub fn cached_pitches(&self) -> usize {
    self.lock_cache().len()
  }

  fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Signal>>> {
    // a poisoned cache still holds complete renders
    self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Unscaled waveform for `pitch`, rendered on first use.
  ///
  /// Rendering happens outside the lock; when two threads race on a new pitch the
  /// first insert wins and both return that signal.
  pub fn waveform(&self, pitch: &str) -> Result<Arc<Signal>> {
    if let Some(sig) = self.lock_cache().get(pitch) {
      return Ok(Arc::clone(sig));
    }
    let rendered = Arc::new(self.render(pitch)?);
    let mut cache = self.lock_cache();
    Ok(Arc::clone(cache.entry(pitch.to_string()).or_insert(rendered)))
  }

  fn render(&self, pitch: &str) -> Result<Signal> {
    let ratio = tuning::ratio(pitch)?;
    let frames = self.frames();
    debug!("Rendering pitch {} ({} frames, ratio {})", pitch, frames, ratio);
    // depth is pitch independent; only carrier and modulator follow the ratio
    let theta = self.theta.scale(ratio);
    let beta = self.beta.scale(ratio);
    let fm = gen::fm(frames, &theta, &self.alpha, &beta)?;
    fm.elementwise_mul(&self.env)
  }
}

impl Instrument for FmInstrument {
  fn duration(&self) -> f64 {
    self.dur
  }

  fn play_note(&self, note: &Note) -> Result<Signal> {
    Ok(self.waveform(&note.name)?.scale(note.amp))
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::SynthError;
  use crate::synth::hz_to_inc;

  fn config() -> SynthConfig {
    SynthConfig::default()
  }

  fn flat(dur: f64) -> FmInstrument {
    let c = config();
    let frames = c.frames_of(dur);
    FmInstrument::new(c, hz_to_inc(c.sample_rate, 440.0), 2.0, hz_to_inc(c.sample_rate, 110.0), Signal::new(vec![1.0; frames]), dur)
  }

  fn note(name: &str, amp: f64) -> Note {
    Note::new(name, amp, 0.0, 0.1)
  }

  #[test]
  fn test_amplitude_not_cached() {
    let inst = flat(0.1);
    let loud = inst.play_note(&note("a4", 1.0)).unwrap();
    let soft = inst.play_note(&note("a4", 0.25)).unwrap();
    assert_eq!(inst.cached_pitches(), 1);
    assert_eq!(loud.len(), 1102);
    for i in 0..loud.len() {
      assert_eq!(soft[i], loud[i] * 0.25);
    }
  }

  #[test]
  fn test_cache_reused_per_pitch() {
    let inst = flat(0.1);
    let a = inst.waveform("a4").unwrap();
    let b = inst.waveform("a4").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    inst.waveform("c4").unwrap();
    assert_eq!(inst.cached_pitches(), 2);
  }

  #[test]
  fn test_cache_race_keeps_first_insert() {
    use rayon::prelude::*;
    let inst = flat(0.1);
    let renders: Vec<Arc<Signal>> = (0..64).into_par_iter().map(|_| inst.waveform("c4").unwrap()).collect();
    assert!(renders.iter().all(|sig| Arc::ptr_eq(sig, &renders[0])));
    assert_eq!(inst.cached_pitches(), 1);
    assert_eq!(*inst.waveform("c4").unwrap(), *renders[0]);
  }

  #[test]
  fn test_pitch_scales_carrier_and_modulator() {
    let c = config();
    let inst = flat(0.1);
    let a5 = inst.waveform("a5").unwrap();
    let expected = gen::fm(
      inst.frames(),
      &ModParam::Scalar(hz_to_inc(c.sample_rate, 440.0) * 2.0),
      &ModParam::Scalar(2.0),
      &ModParam::Scalar(hz_to_inc(c.sample_rate, 110.0) * 2.0),
    )
    .unwrap();
    assert_eq!(*a5, expected);
  }

  #[test]
  fn test_rest_follows_fm_formula() {
    let inst = flat(0.1);
    let rest = inst.waveform("r").unwrap();
    // ratio 0 zeroes both increments, leaving sin(alpha * sin(0))
    assert_eq!(rest.len(), inst.frames());
    assert!(rest.val.iter().all(|&x| x == 0.0));
  }

  #[test]
  fn test_unknown_pitch() {
    let inst = flat(0.1);
    assert!(matches!(inst.play_note(&note("x1", 1.0)), Err(SynthError::UnknownPitch(_))));
    assert_eq!(inst.cached_pitches(), 0);
  }

  #[test]
  fn test_envelope_length_must_match() {
    let c = config();
    let inst = FmInstrument::new(c, 0.1, 0.0, 0.1, Signal::new(vec![1.0; 10]), 0.1);
    assert!(matches!(inst.waveform("a4"), Err(SynthError::LengthMismatch { .. })));
  }
}
