//! Unified error type for storyboard.

use thiserror::Error;

/// Errors that can occur while generating images for a batch of paragraphs.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No API key configured.
    #[error("No API key. Pass -k/--api-key, set {env_var}, or add it to the config file.")]
    MissingApiKey {
        /// The environment variable name.
        env_var: String,
    },

    /// The input text file could not be read or decoded.
    #[error("Cannot read {path}: {source}")]
    UnreadableInput {
        /// Path to the input file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input text file contained no paragraphs.
    #[error("No paragraphs found in {path}")]
    NoContent {
        /// Path to the input file.
        path: String,
    },
}
