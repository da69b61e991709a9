//! Validation and translation of generation parameters.

/// Maximum prompt length accepted by the image API, in characters.
///
/// Longer paragraphs are cut at this limit before being sent; the remainder
/// is never transmitted.
pub const MAX_PROMPT_CHARS: usize = 4000;

/// Truncate a paragraph to [`MAX_PROMPT_CHARS`] characters.
///
/// The cut lands on a char boundary, so multi-byte text stays valid UTF-8.
#[must_use]
pub fn truncate_prompt(text: &str) -> &str {
    match text.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Validate the image size parameter.
///
/// # Errors
///
/// Returns an error if the size is not recognized.
pub fn validate_size(size: &str) -> Result<(), String> {
    match size {
        "auto" | "1024x1024" | "1536x1024" | "1024x1536" => Ok(()),
        _ => Err(format!(
            "Unsupported size '{size}'. Valid: auto, 1024x1024, 1536x1024, 1024x1536"
        )),
    }
}

/// Validate the concurrency ceiling.
///
/// # Errors
///
/// Returns an error if the limit is zero.
pub fn validate_concurrency(limit: usize) -> Result<(), String> {
    if limit == 0 {
        Err("Concurrency limit must be a positive integer".to_string())
    } else {
        Ok(())
    }
}
