//! Generators for commonly shaped signals.
//! Every generator takes a frame count `n` and returns exactly `n` samples.
use crate::error::{Result, SynthError};
use crate::signal::Signal;
use rand::{thread_rng, Rng};

/// A modulation parameter: one value for every frame, or a value per frame.
#[derive(Clone, Debug, PartialEq)]
pub enum ModParam {
  Scalar(f64),
  Sequence(Signal),
}

impl ModParam {
  #[inline]
  pub fn at(&self, i: usize) -> f64 {
    match self {
      ModParam::Scalar(v) => *v,
      ModParam::Sequence(sig) => sig[i],
    }
  }

  /// Multiplies every value by `k`, keeping the variant.
  pub fn scale(&self, k: f64) -> ModParam {
    match self {
      ModParam::Scalar(v) => ModParam::Scalar(v * k),
      ModParam::Sequence(sig) => ModParam::Sequence(sig.scale(k)),
    }
  }

  /// Sequences must cover at least `n` frames.
  fn covers(&self, n: usize) -> Result<()> {
    match self {
      ModParam::Sequence(sig) if sig.len() < n => Err(SynthError::LengthMismatch { left: n, right: sig.len() }),
      _ => Ok(()),
    }
  }
}

impl From<f64> for ModParam {
  fn from(v: f64) -> Self {
    ModParam::Scalar(v)
  }
}

impl From<Signal> for ModParam {
  fn from(sig: Signal) -> Self {
    ModParam::Sequence(sig)
  }
}

/// `amp * sin(inc * i)`. The increment is per frame, not per second.
pub fn sine(n: usize, inc: f64, amp: f64) -> Signal {
  Signal::new((0..n).map(|i| amp * (inc * i as f64).sin()).collect())
}

/// Values in [start, end): `end` itself is never reached.
pub fn linear(n: usize, start: f64, end: f64) -> Signal {
  let inc = (end - start) / n as f64;
  Signal::new((0..n).map(|i| start + inc * i as f64).collect())
}

/// Phase modulated carrier: `sin(theta[i]*i + alpha[i]*sin(beta[i]*i))`.
///
/// `theta` is the carrier increment, `alpha` the modulation depth and `beta` the
/// modulator increment. Scalars broadcast to every frame.
pub fn fm(n: usize, theta: &ModParam, alpha: &ModParam, beta: &ModParam) -> Result<Signal> {
  theta.covers(n)?;
  alpha.covers(n)?;
  beta.covers(n)?;
  Ok(Signal::new(
    (0..n)
      .map(|i| {
        let t = i as f64;
        (theta.at(i) * t + alpha.at(i) * (beta.at(i) * t).sin()).sin()
      })
      .collect(),
  ))
}

/// `amp * exp(-i / (tau * sample_rate))` with `tau` in seconds.
pub fn exp_decay(n: usize, amp: f64, tau: f64, sample_rate: u32) -> Signal {
  let sr = sample_rate as f64;
  Signal::new((0..n).map(|i| amp * (-(i as f64) / tau / sr).exp()).collect())
}

/// Uniform white noise in [-1, 1).
pub fn noise(n: usize) -> Signal {
  let mut rng = thread_rng();
  Signal::new((0..n).map(|_| rng.gen_range(-1f64..1f64)).collect())
}
