use lane_ipm::config::{load_track_frames_config, CalibrationInput, TrackFramesConfig};
use lane_ipm::image::draw::draw_polar_lines;
use lane_ipm::image::io::{load_frame, save_frame, write_json_file};
use lane_ipm::ipm::rectangle_from_diagonal;
use lane_ipm::{
    CalibrationModel, Frame, FrameReport, GroundPoint, GroundProjector, LineCoordinates,
};
use log::warn;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameRecord {
    path: PathBuf,
    report: FrameReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<LineCoordinates>,
    /// Ground positions of `coordinates` in the same order; `None` where the
    /// point lies at or above the horizon.
    #[serde(skip_serializing_if = "Option::is_none")]
    ground: Option<Vec<Option<GroundPoint>>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackingSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    calibration: Option<CalibrationModel>,
    frames: Vec<FrameRecord>,
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "track_frames".to_string());
    let config_path = env::args()
        .nth(1)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config = load_track_frames_config(Path::new(&config_path))?;
    if config.frames.is_empty() {
        return Err("No frames listed in config".to_string());
    }

    let mut detector = config
        .session
        .build_detector()
        .map_err(|e| format!("Invalid session config: {e}"))?;
    // Camera size comes from the first frame.
    let projector = build_projector(&config, &load_frame(&config.frames[0])?)?;
    let mut records = Vec::with_capacity(config.frames.len());

    for (index, path) in config.frames.iter().enumerate() {
        let frame = load_frame(path)?;

        let report = detector
            .process(&frame)
            .map_err(|e| format!("Frame {}: {e}", path.display()))?;
        let coordinates = detector.line_coordinates();
        let ground = coordinates.map(|c| {
            projector
                .project_points(&c.to_array())
                .into_iter()
                .map(|r| match r {
                    Ok(g) => Some(g),
                    Err(err) => {
                        warn!("frame {}: {}", index, err);
                        None
                    }
                })
                .collect::<Vec<_>>()
        });

        if let Some(dir) = &config.output.overlay_dir {
            let lines = [report.left.original, report.right.original];
            let overlay = draw_polar_lines(&frame, &lines, [255, 0, 0]);
            save_frame(&overlay, &dir.join(format!("overlay_{index:05}.png")))?;
        }
        if let Some(dir) = &config.output.birdseye_dir {
            if let Ok(warped) = projector.inv_perspective_mapping(&frame) {
                save_frame(&warped, &dir.join(format!("birdseye_{index:05}.png")))?;
            }
        }

        println!(
            "{}: left={:?} (misses {}) right={:?} (misses {}) candidates={} {:.2} ms",
            path.display(),
            report.left.event,
            report.left.misses,
            report.right.event,
            report.right.misses,
            report.candidates,
            report.timing.total_ms
        );
        records.push(FrameRecord {
            path: path.clone(),
            report,
            coordinates,
            ground,
        });
    }

    let summary = TrackingSummary {
        calibration: projector.calibration().map(|model| (*model).clone()),
        frames: records,
    };
    write_json_file(&config.output.json, &summary)?;
    println!("JSON report written to {}", config.output.json.display());
    Ok(())
}

/// Camera geometry for the frame size plus the optional bird's-eye
/// calibration.
fn build_projector(config: &TrackFramesConfig, frame: &Frame) -> Result<GroundProjector, String> {
    let camera = config
        .session
        .camera(frame.width() as u32, frame.height() as u32)
        .map_err(|e| format!("Invalid camera config: {e}"))?;
    let mut projector =
        GroundProjector::new(camera).map_err(|e| format!("Invalid camera config: {e}"))?;

    let Some(CalibrationInput {
        source,
        destination,
        diagonal,
    }) = config.calibration.clone()
    else {
        return Ok(projector);
    };
    let result = match (destination, diagonal) {
        (Some(dst), _) => projector.calibrate(source, dst),
        (None, Some([a, b])) => projector.calibrate(source, rectangle_from_diagonal(a, b)),
        (None, None) => projector.calibrate_from_geometry(camera, source),
    };
    result.map_err(|e| format!("Calibration failed: {e}"))?;
    Ok(projector)
}
