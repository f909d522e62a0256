use bevy::color::HexColorError;

/// Error types for data crossing the engine boundary: manifests, style
/// profiles, host messages and landmark recordings.
#[derive(Debug)]
pub enum OverlayError {
    JsonError(serde_json::Error),
    InvalidColour(String, HexColorError),
    TooFewLandmarks { expected: usize, found: usize },
    NonFiniteLandmark(usize),
    ModelIndexOutOfRange(usize),
    AssetLoadFailed(String),
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::JsonError(err)
    }
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayError::JsonError(e) => write!(f, "JSON error: {}", e),
            OverlayError::InvalidColour(value, e) => {
                write!(f, "Invalid colour '{}': {}", value, e)
            }
            OverlayError::TooFewLandmarks { expected, found } => write!(
                f,
                "Landmark frame has {} points, schema needs at least {}",
                found, expected
            ),
            OverlayError::NonFiniteLandmark(index) => {
                write!(f, "Landmark {} is not a finite coordinate", index)
            }
            OverlayError::ModelIndexOutOfRange(index) => {
                write!(f, "No model at catalogue index {}", index)
            }
            OverlayError::AssetLoadFailed(reason) => write!(f, "Asset load failed: {}", reason),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::JsonError(e) => Some(e),
            OverlayError::InvalidColour(_, e) => Some(e),
            _ => None,
        }
    }
}
