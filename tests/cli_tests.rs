use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Working directory with a local config so runs never touch the user's config dir
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.yaml"), "{}\n").unwrap();
    dir
}

fn suite(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ai-suite").unwrap();
    cmd.current_dir(dir)
        .env_remove("GOOGLE_API_KEY")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_shows_usage() {
    let dir = workspace();
    suite(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("youtube"))
        .stdout(predicate::str::contains("chat-to-pdf"));
}

#[test]
fn about_lists_every_tool() {
    let dir = workspace();
    suite(dir.path())
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to AI App Suite!"))
        .stdout(predicate::str::contains("ppt"));
}

#[test]
fn styles_show_word_ceilings() {
    let dir = workspace();
    suite(dir.path())
        .arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bullet Points (max 250 words)"))
        .stdout(predicate::str::contains("Short Summary (max 100 words)"))
        .stdout(predicate::str::contains("Key Highlights (max 150 words)"));
}

#[test]
fn config_show_reports_missing_key() {
    let dir = workspace();
    suite(dir.path())
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Configuration:"))
        .stdout(predicate::str::contains("API Key: (not set)"));
}

#[test]
fn ppt_from_text_file_writes_deck() {
    let dir = workspace();
    std::fs::write(dir.path().join("slides.txt"), "Title A\nBody A\n").unwrap();

    suite(dir.path())
        .args(["ppt", "file", "slides.txt", "-o", "deck.pptx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Presentation saved to: deck.pptx"));

    let bytes = std::fs::read(dir.path().join("deck.pptx")).unwrap();
    assert!(bytes.starts_with(b"PK\x03\x04"));
}

#[test]
fn ppt_manual_uses_default_name() {
    let dir = workspace();
    suite(dir.path())
        .args(["ppt", "manual", "--title", "Roadmap", "--content", "Q1\nQ2"])
        .assert()
        .success();

    assert!(dir.path().join("generated_ppt.pptx").exists());
}

#[test]
fn ppt_from_empty_file_fails() {
    let dir = workspace();
    std::fs::write(dir.path().join("empty.txt"), "").unwrap();

    suite(dir.path())
        .args(["ppt", "file", "empty.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An error occurred:"));
    assert!(!dir.path().join("generated_ppt.pptx").exists());
}

#[test]
fn chat_to_pdf_writes_pdf() {
    let dir = workspace();
    suite(dir.path())
        .args(["chat-to-pdf", "Meeting notes (draft)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chat_to_pdf.pdf"));

    let bytes = std::fs::read(dir.path().join("chat_to_pdf.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
}

#[test]
fn chat_to_pdf_rejects_blank_text() {
    let dir = workspace();
    suite(dir.path())
        .args(["chat-to-pdf", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter text to convert."));
}

#[test]
fn youtube_requires_api_key() {
    let dir = workspace();
    suite(dir.path())
        .args(["--quiet", "youtube", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gemini API key is missing"));
}

#[test]
fn youtube_rejects_link_without_identifier() {
    let dir = workspace();
    suite(dir.path())
        .args(["--quiet", "--api-key", "test-key", "youtube", "https://example.com/watch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid YouTube URL format"));
}

#[test]
fn unknown_style_is_rejected_by_parser() {
    let dir = workspace();
    suite(dir.path())
        .args(["youtube", "https://youtu.be/dQw4w9WgXcQ", "--style", "haiku"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'haiku'"));
}
