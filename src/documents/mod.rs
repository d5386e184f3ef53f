//! Presentation and PDF generation from plain text.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod pdf;
pub mod pptx;

pub use pdf::write_text_pdf;
pub use pptx::write_pptx;

use crate::{Result, SuiteError};

pub const DEFAULT_PPTX_NAME: &str = "generated_ppt.pptx";
pub const DEFAULT_PDF_NAME: &str = "chat_to_pdf.pdf";

pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const PDF_MIME: &str = "application/pdf";

const MISSING_BODY: &str = "No Content";

/// One title-and-content slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub body: String,
}

impl Slide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Build slides from an uploaded text file: odd lines are titles, even lines bodies.
///
/// Each line is trimmed. A trailing line without a partner becomes a slide
/// with the placeholder body. One final newline does not add an empty slide.
pub fn slides_from_text(content: &str) -> Vec<Slide> {
    let content = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content);

    if content.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    lines
        .chunks(2)
        .map(|pair| {
            let title = pair[0].trim();
            let body = pair.get(1).map(|line| line.trim()).unwrap_or(MISSING_BODY);
            Slide::new(title, body)
        })
        .collect()
}

/// Path for a generated file: the explicit one, or the default name in the output directory
pub fn resolve_output(explicit: Option<&Path>, output_dir: &Path, default_name: &str) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_dir.join(default_name))
}

/// Write generated bytes, creating parent directories as needed
pub fn save_document(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, bytes)?;
    tracing::info!("Saved {} to {}", crate::utils::format_file_size(bytes.len() as u64), path.display());
    Ok(())
}

/// Build a deck from an uploaded text file
pub fn presentation_from_text(content: &str) -> Result<Vec<u8>> {
    let slides = slides_from_text(content);
    if slides.is_empty() {
        return Err(SuiteError::EmptyInput(
            "The uploaded file has no lines to turn into slides.".to_string(),
        ));
    }
    write_pptx(&slides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lines_make_one_slide() {
        assert_eq!(slides_from_text("Title A\nBody A"), vec![Slide::new("Title A", "Body A")]);
    }

    #[test]
    fn trailing_newline_does_not_add_a_slide() {
        assert_eq!(
            slides_from_text("Title A\r\nBody A\r\n"),
            vec![Slide::new("Title A", "Body A")]
        );
    }

    #[test]
    fn odd_line_count_uses_placeholder_body() {
        let slides = slides_from_text("  One \n first body\nTwo");
        assert_eq!(
            slides,
            vec![Slide::new("One", "first body"), Slide::new("Two", "No Content")]
        );
    }

    #[test]
    fn single_line_is_a_title_slide() {
        assert_eq!(slides_from_text(" Only title "), vec![Slide::new("Only title", "No Content")]);
        assert_eq!(slides_from_text("\nBody"), vec![Slide::new("", "Body")]);
    }

    #[test]
    fn blank_lines_are_kept_in_position() {
        let slides = slides_from_text("Title\n\nNext\nBody");
        assert_eq!(slides, vec![Slide::new("Title", ""), Slide::new("Next", "Body")]);
    }

    #[test]
    fn empty_upload_is_rejected() {
        assert!(slides_from_text("").is_empty());
        assert!(matches!(
            presentation_from_text("\n"),
            Err(SuiteError::EmptyInput(_))
        ));
    }

    #[test]
    fn output_path_defaults_into_directory() {
        let dir = Path::new("out");
        assert_eq!(
            resolve_output(None, dir, DEFAULT_PPTX_NAME),
            PathBuf::from("out/generated_ppt.pptx")
        );
        assert_eq!(
            resolve_output(Some(Path::new("deck.pptx")), dir, DEFAULT_PPTX_NAME),
            PathBuf::from("deck.pptx")
        );
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.bin");
        save_document(&path, b"data").unwrap();
        assert_eq!(fs_err::read(&path).unwrap(), b"data");
    }
}
