//! Pitch names to frequency ratios relative to a4.
use crate::error::{Result, SynthError};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Pseudo pitch for a rest. Maps to ratio 0.
pub const REST: &str = "r";

static RATIOS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
  HashMap::from([
    ("c2", 0.1486), ("d2", 0.1668), ("e2", 0.1872), ("f2", 0.1984), ("g2", 0.2227),
    ("a2", 0.2500), ("b2", 0.2806), ("c3", 0.2973), ("d3", 0.3337), ("e3", 0.3745),
    ("f3", 0.3968), ("g3", 0.4454), ("a3", 0.5000), ("b3", 0.5612), ("c4", 0.5946),
    ("d4", 0.6674), ("e4", 0.7491), ("f4", 0.7937), ("g4", 0.8909), ("a4", 1.0),
    ("b4", 1.1224), ("c5", 1.1892), ("d5", 1.3348), ("e5", 1.4983),
    ("f5", 1.5874), ("g5", 1.7818), ("a5", 2.0), ("b5", 2.2449), (REST, 0.0),
  ])
});

pub fn ratio(pitch: &str) -> Result<f64> {
  RATIOS.get(pitch).copied().ok_or_else(|| SynthError::UnknownPitch(pitch.to_string()))
}

pub fn is_known(pitch: &str) -> bool {
  RATIOS.contains_key(pitch)
}

pub fn pitches() -> impl Iterator<Item = &'static str> {
  RATIOS.keys().copied()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_reference_and_rest() {
    assert_eq!(ratio("a4").unwrap(), 1.0);
    assert_eq!(ratio("a5").unwrap(), 2.0);
    assert_eq!(ratio(REST).unwrap(), 0.0);
  }

  #[test]
  fn test_unknown_pitch_names_offender() {
    match ratio("h9") {
      Err(SynthError::UnknownPitch(name)) => assert_eq!(name, "h9"),
      other => panic!("Expected unknown pitch, got {:?}", other),
    }
  }

  #[test]
  fn test_ratios_positive_except_rest() {
    assert_eq!(pitches().count(), 29);
    for p in pitches().filter(|p| *p != REST) {
      assert!(ratio(p).unwrap() > 0.0, "{}", p);
    }
  }
}
