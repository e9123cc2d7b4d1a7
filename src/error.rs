use std::fmt;

#[derive(Debug)]
pub enum SynthError {
    /// Elementwise operation on signals of different length.
    LengthMismatch { left: usize, right: usize },
    UnknownPitch(String),
    UnknownInstrument(String),
    Wav(hound::Error),
    Io(std::io::Error),
    Playbook(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SynthError>;

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::LengthMismatch { left, right } => {
                write!(f, "Signal length mismatch: {left} samples against {right}")
            }
            SynthError::UnknownPitch(name) => write!(f, "Unknown pitch '{name}'"),
            SynthError::UnknownInstrument(name) => write!(f, "Unknown instrument '{name}'"),
            SynthError::Wav(e) => write!(f, "WAV error: {e}"),
            SynthError::Io(e) => write!(f, "I/O error: {e}"),
            SynthError::Playbook(e) => write!(f, "Malformed playbook: {e}"),
        }
    }
}

impl std::error::Error for SynthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SynthError::Wav(e) => Some(e),
            SynthError::Io(e) => Some(e),
            SynthError::Playbook(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hound::Error> for SynthError {
    fn from(e: hound::Error) -> Self {
        SynthError::Wav(e)
    }
}

impl From<std::io::Error> for SynthError {
    fn from(e: std::io::Error) -> Self {
        SynthError::Io(e)
    }
}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        SynthError::Playbook(e)
    }
}
