//! I/O helpers for frames, masks and JSON.
//!
//! - `load_frame`: read a PNG/JPEG/etc. into an owned RGB [`Frame`].
//! - `save_frame`: write a [`Frame`] to disk (format from the extension).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::Frame;
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_frame(path: &Path) -> Result<Frame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Frame::from_rgb(width, height, img.into_raw())
        .ok_or_else(|| format!("Unexpected buffer size for {}", path.display()))
}

/// Save an RGB frame.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = RgbImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.as_raw().to_vec(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
