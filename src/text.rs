//! Paragraph splitting for input text files.

use std::path::Path;

use crate::error::ImageError;

/// Split raw text into paragraphs.
///
/// Paragraphs are separated by blank lines (the `"\n\n"` token). Each
/// candidate is trimmed of surrounding whitespace; candidates that become
/// empty are discarded. Order is preserved — a paragraph's position in the
/// returned sequence is its index for output naming.
#[must_use]
pub fn split_paragraphs(content: &str) -> Vec<String> {
    content.split("\n\n").map(str::trim).filter(|p| !p.is_empty()).map(ToString::to_string).collect()
}

/// Read a text file and split it into paragraphs.
///
/// # Errors
///
/// Returns [`ImageError::UnreadableInput`] if the file cannot be opened or
/// is not valid UTF-8, and [`ImageError::NoContent`] if no paragraphs remain
/// after trimming.
pub fn load_paragraphs(path: &Path) -> Result<Vec<String>, ImageError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImageError::UnreadableInput {
        path: path.display().to_string(),
        source,
    })?;

    let paragraphs = split_paragraphs(&content);
    if paragraphs.is_empty() {
        return Err(ImageError::NoContent { path: path.display().to_string() });
    }
    Ok(paragraphs)
}
