//! Carrier file loading and saving.
//!
//! Input may be any of the supported formats, including JPEG. Output is
//! always PNG: lossy re-compression would destroy the embedded bits.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::config::{StegConfig, SUPPORTED_EXTENSIONS};
use crate::error::{Result, StegError};

use super::ImageStego;

/// Returns the lowercase extension of `path` with a leading dot.
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Checks whether `path` has a supported carrier extension.
pub fn is_supported(path: &Path) -> bool {
    dotted_extension(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Validates that `path` exists and has a supported extension.
pub fn check_carrier_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(StegError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("No such file: {}", path.display()),
        )));
    }
    if !is_supported(path) {
        return Err(StegError::UnsupportedFormat(format!(
            "{} (supported: {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// Loads a carrier image from a file path.
pub fn load_carrier<P: AsRef<Path>>(path: P) -> Result<ImageStego> {
    let path = path.as_ref();
    check_carrier_path(path)?;

    debug!("Opening: {}", path.display());
    let image = image::open(path).map_err(|e| StegError::ImageLoad(e.to_string()))?;
    Ok(ImageStego::from_image(image))
}

/// Loads a carrier image from encoded bytes.
pub fn load_carrier_from_bytes(bytes: &[u8]) -> Result<ImageStego> {
    let image =
        image::load_from_memory(bytes).map_err(|e| StegError::ImageLoad(e.to_string()))?;
    Ok(ImageStego::from_image(image))
}

/// Saves an image as PNG, creating parent directories as needed.
///
/// The format is always PNG regardless of the extension of `path`.
pub fn save_carrier<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    debug!("Saving image to {}", path.display());
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| StegError::ImageSave(e.to_string()))
}

/// Encodes an image as PNG bytes.
pub fn to_png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| StegError::ImageSave(e.to_string()))?;
    Ok(bytes)
}

/// Derives the output path for an encoded carrier:
/// `<output_dir>/<prefix><stem>.png`.
pub fn output_path(input: &Path, config: &StegConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("carrier");
    config
        .output_dir
        .join(format!("{}{}.png", config.output_prefix, stem))
}
