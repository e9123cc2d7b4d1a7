//! Instrument builders. Frequencies are given in Hz and converted to per-frame increments.
use crate::gen;
use crate::instrument::FmInstrument;
use crate::signal::Signal;
use crate::synth::hz_to_inc;
use crate::synth_config::SynthConfig;

/// Bell or gong: a steady carrier whose modulation depth decays from `i0`.
///
/// `amp_tau` and `ind_tau` are the time constants in seconds of the amplitude envelope
/// and of the modulation index.
pub fn gong_like(config: SynthConfig, fc: f64, fm: f64, i0: f64, dur: f64, amp_tau: f64, ind_tau: f64) -> FmInstrument {
  let sr = config.sample_rate;
  let frames = config.frames_of(dur);
  let theta = gen::linear(frames, hz_to_inc(sr, fc), hz_to_inc(sr, fc));
  let alpha = gen::exp_decay(frames, i0, ind_tau, sr);
  let beta = gen::linear(frames, hz_to_inc(sr, fm), hz_to_inc(sr, fm));
  let env = gen::exp_decay(frames, 1f64, amp_tau, sr);
  FmInstrument::new(config, theta, alpha, beta, env, dur)
}

/// Plucked string. Depth glides from `a0` to `a1` over the first half of the note
/// and holds `a1` for the rest.
pub fn pluck(config: SynthConfig, theta: f64, a0: f64, a1: f64, beta: f64, dur: f64) -> FmInstrument {
  let sr = config.sample_rate;
  let frames = config.frames_of(dur);
  let mut alpha = gen::linear(frames / 2, a0, a1);
  alpha.append(&gen::linear(frames - frames / 2, a1, a1));
  let env = gen::exp_decay(frames, 1f64, 0.125, sr);
  FmInstrument::new(
    config,
    Signal::new(vec![hz_to_inc(sr, theta); frames]),
    alpha,
    Signal::new(vec![hz_to_inc(sr, beta); frames]),
    env,
    dur,
  )
}

/// `pluck` with a symmetric swell: rises from silence and falls back to it at the end.
pub fn pluck_env2(config: SynthConfig, theta: f64, a0: f64, a1: f64, beta: f64, dur: f64) -> FmInstrument {
  let mut inst = pluck(config, theta, a0, a1, beta, dur);
  inst.env = swell(config.frames_of(dur), config.sample_rate_f());
  inst
}

fn swell(frames: usize, sr: f64) -> Signal {
  let rise: Vec<f64> = (0..frames).map(|i| 1f64 - (-(i as f64) / sr / 0.25).exp()).collect();
  let mut env = Signal::new((0..frames).map(|i| rise[i] * rise[frames - 1 - i]).collect());
  let peak = env.peak();
  if peak > 0f64 {
    env.amplify(1f64 / peak);
  }
  env
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::instrument::Instrument;
  use crate::song::Note;

  #[test]
  fn test_pluck_depth_glide() {
    let config = SynthConfig::default();
    let inst = pluck(config, 700.0, 5.0, 2.5, 700.0, 0.5);
    assert_eq!(inst.frames(), 5512);
    assert_eq!(inst.duration(), 0.5);
    assert_eq!(inst.alpha.at(0), 5.0);
    assert_eq!(inst.alpha.at(2756), 2.5);
    assert_eq!(inst.alpha.at(5511), 2.5);
    assert_eq!(inst.env.len(), 5512);
  }

  #[test]
  fn test_gong_renders_full_note() {
    let config = SynthConfig::default();
    let inst = gong_like(config, 85.0, 65.0, 15.0, 2.0, 0.25, 0.5);
    let sig = inst.play_note(&Note::new("a3", 0.5, 0.0, 2.0)).unwrap();
    assert_eq!(sig.len(), 22050);
    assert!(sig.peak() <= 0.5);
    assert!(sig.peak() > 0.0);
  }

  #[test]
  fn test_swell_normalized_and_symmetric() {
    let env = swell(1001, 11025.0);
    assert_eq!(env[0], 0.0);
    assert_eq!(env[1000], 0.0);
    assert!((env.peak() - 1.0).abs() < 1e-12);
    assert!((env[100] - env[900]).abs() < 1e-12);
  }

  #[test]
  fn test_pluck_env2_swaps_envelope() {
    let config = SynthConfig::default();
    let inst = pluck_env2(config, 440.0, 3.0, 1.0, 220.0, 1.0);
    assert_eq!(inst.env.len(), 11025);
    assert_eq!(inst.env[0], 0.0);
    assert!(inst.play_note(&Note::new("c4", 1.0, 0.0, 1.0)).is_ok());
  }
}
