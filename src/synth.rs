/// Process-wide constants for the sheet synthesizer.
///
/// Sample rate, PCM scaling and the tempo used when nothing else is configured.
/// Runtime values live in `SynthConfig`; these are its defaults.
pub const pi: f64 = std::f64::consts::PI;
pub const pi2: f64 = pi * 2f64;

pub const SR: usize = 11025;
pub const SRu: u32 = SR as u32;

/// Signed 16 bit full scale as used by the quantizer (127 * 256, not i16::MAX).
pub const PCM_FULL_SCALE: f64 = 127f64 * 256f64;

/// Fraction of full scale the loudest sample is mapped to.
pub const PCM_HEADROOM: f64 = 0.9;

pub const DEFAULT_BPM: f64 = 60f64;

/// Converts a frequency in Hz into the per-frame angular increment at `sample_rate`.
pub fn hz_to_inc(sample_rate: u32, hz: f64) -> f64 {
  hz * (pi2 / sample_rate as f64)
}

/// Number of whole frames covered by `seconds`. Always truncates.
pub fn frames_of(sample_rate: u32, seconds: f64) -> usize {
  (sample_rate as f64 * seconds) as usize
}
