#![allow(dead_code)]
use raudio_sheet::synth_config::SynthConfig;
use std::path::{Path, PathBuf};

pub fn test_audio_name(dir: &Path, config: &SynthConfig, label: &str) -> PathBuf {
    let name: String = format!("{}_sample-rate_{}_channels_{}", label, config.sample_rate, 1);
    dir.join(format!("{}.wav", name))
}

// Default render settings: 11025 Hz, 60 BPM
pub fn test_config() -> SynthConfig {
    SynthConfig::default()
}
