//! Output directory handling, positional file naming, and PNG saving.

use std::path::{Path, PathBuf};

use crate::error::ImageError;

/// Create the output directory, including missing parents.
///
/// Idempotent: succeeds if the directory already exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ImageError> {
    std::fs::create_dir_all(dir).map_err(ImageError::Io)
}

/// Output path for a paragraph: `{dir}/{index + 1}.png`.
///
/// Filenames follow source order, never completion order.
#[must_use]
pub fn paragraph_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{}.png", index + 1))
}

/// Save image bytes as a PNG file, converting format if necessary.
///
/// Overwrites any existing file at `output_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(data: &[u8], source_mime: &str, output_path: &Path) -> Result<(), ImageError> {
    if source_mime == "image/png" {
        std::fs::write(output_path, data).map_err(ImageError::Io)
    } else {
        convert_and_save(data, output_path)
    }
}

/// Convert image bytes to PNG and save.
fn convert_and_save(data: &[u8], output_path: &Path) -> Result<(), ImageError> {
    let img = image::load_from_memory(data)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to decode image: {e}")))?;

    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to save as png: {e}")))
}
