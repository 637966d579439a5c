use super::load_json;
use super::session::SessionConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of the `track_frames` driver.
#[derive(Debug, Deserialize)]
pub struct TrackFramesConfig {
    /// Frames in processing order.
    pub frames: Vec<PathBuf>,
    #[serde(flatten)]
    pub session: SessionConfig,
    #[serde(default)]
    pub calibration: Option<CalibrationInput>,
    pub output: TrackFramesOutput,
}

/// Control points for the bird's-eye calibration.
///
/// Destination points are taken from `destination`, else built from the
/// `diagonal` corners, else derived from the camera geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationInput {
    pub source: [[f32; 2]; 4],
    #[serde(default)]
    pub destination: Option<[[f32; 2]; 4]>,
    #[serde(default)]
    pub diagonal: Option<[[f32; 2]; 2]>,
}

#[derive(Debug, Deserialize)]
pub struct TrackFramesOutput {
    pub json: PathBuf,
    /// Warped bird's-eye frames, one PNG per input frame.
    #[serde(default)]
    pub birdseye_dir: Option<PathBuf>,
    /// Input frames with the tracked lines drawn over them.
    #[serde(default)]
    pub overlay_dir: Option<PathBuf>,
}

pub fn load_track_frames_config(path: &Path) -> Result<TrackFramesConfig, String> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_fields_are_flattened() {
        let cfg: TrackFramesConfig = serde_json::from_str(
            r#"{
                "frames": ["a.png", "b.png"],
                "roi": { "top_left": [0, 60], "bottom_right": [320, 240] },
                "default_line_points": [[80, 239], [150, 60], [240, 239], [170, 60]],
                "reset_trigger": 4,
                "camera_height_m": 1.2,
                "pitch_angle_deg": 60.0,
                "focal_length_px": 400.0,
                "calibration": { "source": [[100, 230], [220, 230], [140, 120], [180, 120]] },
                "output": { "json": "out/report.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.frames.len(), 2);
        assert_eq!(cfg.session.reset_trigger, 4);
        let cal = cfg.calibration.unwrap();
        assert!(cal.destination.is_none() && cal.diagonal.is_none());
        assert!(cfg.output.birdseye_dir.is_none());
    }
}
