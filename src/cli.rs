//! CLI argument parsing with clap.

use clap::Parser;

/// Bulk AI image generation CLI - one image per paragraph of a text file.
#[derive(Parser, Debug)]
#[command(name = "storyboard", version, about)]
pub struct Cli {
    /// Path to a UTF-8 text file with paragraphs separated by blank lines.
    pub text_file: String,

    /// `OpenAI` API key (falls back to the OPENAI_API_KEY environment variable).
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Output directory for generated images.
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Maximum number of concurrent generation requests.
    #[arg(short, long, default_value_t = 5)]
    pub concurrent: usize,

    /// Image size: auto, 1024x1024, 1536x1024, 1024x1536.
    #[arg(short, long, default_value = "auto")]
    pub size: String,

    /// Model name or short alias.
    #[arg(short, long, default_value = "gpt-1")]
    pub model: String,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
