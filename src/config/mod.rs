//! JSON configuration for a tracking session and the driver binary.

pub mod session;
pub mod track_frames;

pub use session::{load_config, SessionConfig};
pub use track_frames::{load_track_frames_config, CalibrationInput, TrackFramesConfig, TrackFramesOutput};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
