//! Cassette replay integration tests — zero network I/O.
//!
//! All tests set `STORYBOARD_REPLAY` to a cassette file path so that the
//! binary never contacts the live API endpoint.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("storyboard").unwrap();
    cmd.env("STORYBOARD_CONFIG", "/nonexistent/storyboard-config.toml");
    cmd.env_remove("OPENAI_API_KEY");
    cmd
}

/// A real 1×1 PNG, base64-encoded, for cassette payloads.
fn png_base64() -> String {
    let img = image::DynamicImage::new_rgb8(1, 1);
    let mut buf = std::io::Cursor::new(Vec::<u8>::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
}

fn ok_interaction(seq: usize, prompt: &str, b64: &str) -> String {
    format!(
        "  - seq: {seq}\n    port: image_generator\n    method: generate\n    input:\n      model: gpt-image-1\n      prompt: \"{prompt}\"\n      size: auto\n    output:\n      Ok:\n        images:\n          - data: {b64}\n            mime_type: image/png\n"
    )
}

fn err_interaction(seq: usize, prompt: &str) -> String {
    format!(
        "  - seq: {seq}\n    port: image_generator\n    method: generate\n    input:\n      model: gpt-image-1\n      prompt: \"{prompt}\"\n      size: auto\n    output:\n      Err: \"API error (500): injected failure\"\n"
    )
}

fn write_cassette(path: &Path, interactions: &[String]) {
    let content = format!(
        "name: batch-test\nrecorded_at: \"2026-02-01T00:00:00Z\"\ncommit: test\ninteractions:\n{}",
        interactions.concat()
    );
    std::fs::write(path, content).unwrap();
}

/// Fresh working directory under the system temp dir.
fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[test]
fn batch_happy_path_creates_numbered_files() {
    let dir = fresh_dir("storyboard_test_batch_happy");
    let input = dir.join("story.txt");
    std::fs::write(&input, "Cat.\n\nDog.\n\n\nBird.").unwrap();

    let b64 = png_base64();
    let cassette = dir.join("batch.cassette.yaml");
    write_cassette(
        &cassette,
        &[
            ok_interaction(0, "Cat.", &b64),
            ok_interaction(1, "Dog.", &b64),
            ok_interaction(2, "Bird.", &b64),
        ],
    );

    let out_dir = dir.join("images");

    cmd()
        .env("STORYBOARD_REPLAY", cassette.to_str().unwrap())
        .args(["-o", out_dir.to_str().unwrap(), input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 3 paragraphs"))
        .stderr(predicate::str::contains("Completed: 3 images generated, 0 failed."));

    for n in 1..=3 {
        let path = out_dir.join(format!("{n}.png"));
        let data = std::fs::read(&path)
            .unwrap_or_else(|e| panic!("missing {}: {e}", path.display()));
        assert_eq!(&data[..8], &PNG_MAGIC, "{} should be a valid PNG", path.display());
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_paragraph_produces_no_file_and_exit_zero() {
    let dir = fresh_dir("storyboard_test_batch_partial");
    let input = dir.join("story.txt");
    std::fs::write(&input, "Cat.\n\nDog.\n\nBird.").unwrap();

    let b64 = png_base64();
    let cassette = dir.join("batch.cassette.yaml");
    write_cassette(
        &cassette,
        &[
            ok_interaction(0, "Cat.", &b64),
            err_interaction(1, "Dog."),
            ok_interaction(2, "Bird.", &b64),
        ],
    );

    let out_dir = dir.join("images");

    cmd()
        .env("STORYBOARD_REPLAY", cassette.to_str().unwrap())
        .args(["-o", out_dir.to_str().unwrap(), input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Paragraph 2:"))
        .stderr(predicate::str::contains("Completed: 2 images generated, 1 failed."));

    assert!(out_dir.join("1.png").exists());
    assert!(!out_dir.join("2.png").exists(), "failed paragraph must produce no file");
    assert!(out_dir.join("3.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bounded_batch_with_limit_two_completes_all_five() {
    let dir = fresh_dir("storyboard_test_batch_limit");
    let input = dir.join("story.txt");
    std::fs::write(&input, "P one.\n\nP two.\n\nP three.\n\nP four.\n\nP five.").unwrap();

    let b64 = png_base64();
    let prompts = ["P one.", "P two.", "P three.", "P four.", "P five."];
    let interactions: Vec<String> = prompts
        .iter()
        .enumerate()
        .map(|(seq, prompt)| ok_interaction(seq, prompt, &b64))
        .collect();
    let cassette = dir.join("batch.cassette.yaml");
    write_cassette(&cassette, &interactions);

    let out_dir = dir.join("images");

    cmd()
        .env("STORYBOARD_REPLAY", cassette.to_str().unwrap())
        .args(["-c", "2", "-o", out_dir.to_str().unwrap(), input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Completed: 5 images generated, 0 failed."));

    for n in 1..=5 {
        assert!(out_dir.join(format!("{n}.png")).exists(), "{n}.png should exist");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn truncated_prompt_is_what_reaches_the_cassette() {
    // End-to-end run with a 5000-char paragraph; the cassette is keyed by
    // the 4000-char truncated prompt. (Exact truncation at the port boundary
    // is asserted in the runner unit tests.)
    let dir = fresh_dir("storyboard_test_batch_truncate");
    let long_paragraph = "x".repeat(5000);
    let truncated: String = long_paragraph.chars().take(4000).collect();

    let input = dir.join("story.txt");
    std::fs::write(&input, &long_paragraph).unwrap();

    let b64 = png_base64();
    let cassette = dir.join("batch.cassette.yaml");
    write_cassette(&cassette, &[ok_interaction(0, &truncated, &b64)]);

    let out_dir = dir.join("images");

    cmd()
        .env("STORYBOARD_REPLAY", cassette.to_str().unwrap())
        .args(["-o", out_dir.to_str().unwrap(), input.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Completed: 1 images generated, 0 failed."));

    assert!(out_dir.join("1.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
