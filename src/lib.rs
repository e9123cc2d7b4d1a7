#![allow(non_upper_case_globals)]
//! FM synthesis of note sheets into 16 bit PCM wave files.
//!
//! Sheets are played on instruments into a `song::Song`, composed onto one timeline and
//! engraved as a mono wave file.
pub mod arg_parse;
pub mod engrave;
pub mod error;
pub mod files;
pub mod gen;
pub mod instrument;
pub mod presets;
pub mod signal;
pub mod song;
pub mod synth;
pub mod synth_config;
pub mod time;
pub mod tuning;

pub use error::{Result, SynthError};
pub use signal::Signal;
