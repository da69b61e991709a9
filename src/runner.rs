//! Bounded fan-out of generation requests over the paragraph batch.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::ImageError;
use crate::output::{paragraph_path, save_image};
use crate::params::truncate_prompt;
use crate::ports::image_generator::{ImageGenerator, ImageRequest};

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory receiving the `{index + 1}.png` files.
    pub output_dir: PathBuf,
    /// Resolved model identifier.
    pub model: String,
    /// Target image size.
    pub size: String,
    /// Maximum number of in-flight generate calls.
    pub concurrency: usize,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Paragraphs whose image was generated and saved.
    pub succeeded: usize,
    /// Paragraphs that failed at any step.
    pub failed: usize,
}

/// Generate and save one image per paragraph.
///
/// Spawns one task per paragraph up front; a counting semaphore keeps at
/// most `options.concurrency` generate calls outstanding. One paragraph's
/// failure never affects another's, and every paragraph ends in exactly one
/// counted outcome.
pub async fn run(
    generator: Arc<dyn ImageGenerator>,
    paragraphs: Vec<String>,
    options: RunOptions,
) -> RunSummary {
    let semaphore = Arc::new(Semaphore::new(options.concurrency));
    let options = Arc::new(options);

    let mut handles = Vec::with_capacity(paragraphs.len());
    for (index, paragraph) in paragraphs.into_iter().enumerate() {
        let generator = Arc::clone(&generator);
        let semaphore = Arc::clone(&semaphore);
        let options = Arc::clone(&options);
        handles.push(tokio::spawn(async move {
            generate_one(generator.as_ref(), &semaphore, &paragraph, index, &options).await
        }));
    }

    let mut summary = RunSummary::default();
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(())) => summary.succeeded += 1,
            Ok(Err(e)) => {
                eprintln!("Paragraph {}: {e}", index + 1);
                summary.failed += 1;
            }
            Err(e) => {
                eprintln!("Paragraph {}: task failed: {e}", index + 1);
                summary.failed += 1;
            }
        }
    }
    summary
}

/// One paragraph: acquire a permit, truncate, generate, save.
///
/// The permit guard drops on every return path, so no permit leaks on
/// failure.
async fn generate_one(
    generator: &dyn ImageGenerator,
    semaphore: &Semaphore,
    paragraph: &str,
    index: usize,
    options: &RunOptions,
) -> Result<(), ImageError> {
    // The runner never closes the semaphore; a closed pool still counts as
    // this paragraph's failure rather than tearing down the batch.
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|e| ImageError::Config(format!("Permit pool closed: {e}")))?;

    let prompt = truncate_prompt(paragraph);
    eprintln!("Generating image {}: {}...", index + 1, preview(prompt));

    let request = ImageRequest {
        model: options.model.clone(),
        prompt: prompt.to_string(),
        size: options.size.clone(),
    };
    let response = generator.generate(&request).await?;

    let image = response.images.into_iter().next().ok_or_else(|| ImageError::Api {
        status: 200,
        message: "No image payload in response".to_string(),
    })?;

    let path = paragraph_path(&options.output_dir, index);
    save_image(&image.data, &image.mime_type, &path)?;
    eprintln!("Saved: {}", path.display());
    Ok(())
}

/// First 50 characters of the prompt, for log lines.
fn preview(prompt: &str) -> String {
    prompt.chars().take(50).collect()
}
