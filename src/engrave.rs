use crate::error::Result;
use crate::files;
use crate::signal::Signal;
use crate::synth_config::SynthConfig;
use std::path::Path;
use tracing::debug;

pub fn pcm_spec(sample_rate: u32) -> hound::WavSpec {
  hound::WavSpec {
    channels: 1,
    sample_rate,
    bits_per_sample: 16,
    sample_format: hound::SampleFormat::Int,
  }
}

/// Writes `signal` as a mono 16 bit PCM wave file, normalized to the loudest sample.
pub fn write_wav<P: AsRef<Path>>(path: P, signal: &Signal, config: &SynthConfig) -> Result<()> {
  let path = path.as_ref();
  files::with_dir(path)?;
  let mut writer = hound::WavWriter::create(path, pcm_spec(config.sample_rate))?;
  for sample in signal.quantize_to_pcm(config.full_scale, config.headroom) {
    writer.write_sample(sample)?;
  }
  writer.finalize()?;
  debug!("Wrote {} frames to {}", signal.len(), path.display());
  Ok(())
}

/// Reads back a 16 bit wave file.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(hound::WavSpec, Vec<i16>)> {
  let mut reader = hound::WavReader::open(path)?;
  let spec = reader.spec();
  let samples = reader.samples::<i16>().collect::<std::result::Result<Vec<i16>, hound::Error>>()?;
  Ok((spec, samples))
}
