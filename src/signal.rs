//! Fixed length sample sequences and their elementwise algebra.
//! Binary operations return new signals; `amplify` and `append` mutate in place.
use crate::error::{Result, SynthError};
use itertools::Itertools;
use std::ops::{Index, Mul};

/// Sample values, one per frame. Frame index is the sample number.
pub type SampleBuffer = Vec<f64>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Signal {
  pub val: SampleBuffer,
}

impl Signal {
  pub fn new(val: SampleBuffer) -> Signal {
    Signal { val }
  }

  pub fn silence(frames: usize) -> Signal {
    Signal { val: vec![0f64; frames] }
  }

  pub fn len(&self) -> usize {
    self.val.len()
  }

  pub fn is_empty(&self) -> bool {
    self.val.is_empty()
  }

  fn check_len(&self, other: &Signal) -> Result<()> {
    if self.len() != other.len() {
      return Err(SynthError::LengthMismatch { left: self.len(), right: other.len() });
    }
    Ok(())
  }

  /// Elementwise sum of two equal length signals.
  pub fn add(&self, other: &Signal) -> Result<Signal> {
    self.check_len(other)?;
    Ok(Signal::new(self.val.iter().zip(&other.val).map(|(a, b)| a + b).collect()))
  }

  /// Elementwise product of two equal length signals.
  pub fn elementwise_mul(&self, other: &Signal) -> Result<Signal> {
    self.check_len(other)?;
    Ok(Signal::new(self.val.iter().zip(&other.val).map(|(a, b)| a * b).collect()))
  }

  pub fn scale(&self, k: f64) -> Signal {
    Signal::new(self.val.iter().map(|x| k * x).collect())
  }

  pub fn amplify(&mut self, k: f64) {
    self.val.iter_mut().for_each(|x| *x *= k)
  }

  pub fn append(&mut self, other: &Signal) {
    self.val.extend_from_slice(&other.val)
  }

  /// Larger of the highest sample and the magnitude of the lowest one.
  /// Zero for an empty signal.
  pub fn peak(&self) -> f64 {
    match self.val.iter().copied().minmax().into_option() {
      Some((min, max)) => max.max(min.abs()),
      None => 0f64,
    }
  }

  /// Maps every sample onto signed 16 bit PCM with a single global normalization:
  /// `trunc(sample * full_scale / peak * headroom)`.
  /// A silent signal maps to all zeros.
  pub fn quantize_to_pcm(&self, full_scale: f64, headroom: f64) -> Vec<i16> {
    let peak = self.peak();
    if peak == 0f64 {
      return vec![0i16; self.len()];
    }
    self.val.iter().map(|x| (x * full_scale / peak * headroom) as i16).collect()
  }

  /// Little endian byte stream of the quantized samples.
  pub fn to_pcm_bytes(&self, full_scale: f64, headroom: f64) -> Vec<u8> {
    self.quantize_to_pcm(full_scale, headroom).iter().flat_map(|s| s.to_le_bytes()).collect()
  }
}

impl From<SampleBuffer> for Signal {
  fn from(val: SampleBuffer) -> Self {
    Signal::new(val)
  }
}

impl Index<usize> for Signal {
  type Output = f64;

  fn index(&self, i: usize) -> &f64 {
    &self.val[i]
  }
}

impl Mul<f64> for &Signal {
  type Output = Signal;

  fn mul(self, k: f64) -> Signal {
    self.scale(k)
  }
}

impl Mul<&Signal> for f64 {
  type Output = Signal;

  fn mul(self, sig: &Signal) -> Signal {
    sig.scale(self)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::synth::{PCM_FULL_SCALE, PCM_HEADROOM};

  fn sig(v: &[f64]) -> Signal {
    Signal::new(v.to_vec())
  }

  #[test]
  fn test_add_elementwise() {
    let a = sig(&[1.0, 2.0, 3.0]);
    let b = sig(&[0.5, -2.0, 10.0]);
    let c = sig(&[0.25, 0.25, 0.25]);
    let ab = a.add(&b).unwrap();
    assert_eq!(ab.val, vec![1.5, 0.0, 13.0]);
    assert_eq!(ab, b.add(&a).unwrap());
    assert_eq!(ab.add(&c).unwrap(), a.add(&b.add(&c).unwrap()).unwrap());
  }

  #[test]
  fn test_length_mismatch() {
    let a = sig(&[1.0, 2.0, 3.0]);
    let b = sig(&[1.0, 2.0]);
    match a.add(&b) {
      Err(SynthError::LengthMismatch { left: 3, right: 2 }) => {}
      other => panic!("Expected a length mismatch, got {:?}", other),
    }
    assert!(a.elementwise_mul(&b).is_err());
  }

  #[test]
  fn test_scalar_mul_commutes() {
    let a = sig(&[1.0, -0.5, 4.0]);
    let left = 3.0 * &a;
    let right = &a * 3.0;
    assert_eq!(left, right);
    assert_eq!(left.val, vec![3.0, -1.5, 12.0]);
  }

  #[test]
  fn test_elementwise_mul() {
    let a = sig(&[1.0, -0.5, 4.0]);
    let b = sig(&[2.0, 2.0, 0.0]);
    assert_eq!(a.elementwise_mul(&b).unwrap().val, vec![2.0, -1.0, 0.0]);
  }

  #[test]
  fn test_amplify_and_append_mutate() {
    let mut a = sig(&[1.0, 2.0]);
    a.amplify(0.5);
    assert_eq!(a.val, vec![0.5, 1.0]);
    a.append(&sig(&[7.0]));
    assert_eq!(a.val, vec![0.5, 1.0, 7.0]);
    assert_eq!(a.len(), 3);
  }

  #[test]
  fn test_peak_uses_negative_extreme() {
    assert_eq!(sig(&[0.5, -2.0, 1.0]).peak(), 2.0);
    assert_eq!(sig(&[-1.0, -3.0]).peak(), 3.0);
    assert_eq!(Signal::default().peak(), 0.0);
  }

  #[test]
  fn test_quantize_truncates() {
    let pcm = sig(&[1.0, -1.0, 0.5, 0.0]).quantize_to_pcm(PCM_FULL_SCALE, PCM_HEADROOM);
    // 32512 * 0.9 = 29260.8
    assert_eq!(pcm, vec![29260, -29260, 14630, 0]);
  }

  #[test]
  fn test_quantize_silence() {
    let pcm = Signal::silence(5).quantize_to_pcm(PCM_FULL_SCALE, PCM_HEADROOM);
    assert_eq!(pcm, vec![0; 5]);
    assert!(Signal::default().quantize_to_pcm(PCM_FULL_SCALE, PCM_HEADROOM).is_empty());
  }

  #[test]
  fn test_pcm_bytes_little_endian() {
    let bytes = sig(&[1.0, -1.0]).to_pcm_bytes(PCM_FULL_SCALE, PCM_HEADROOM);
    assert_eq!(bytes.len(), 4);
    assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), 29260);
    assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), -29260);
  }
}
