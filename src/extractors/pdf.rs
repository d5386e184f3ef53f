use async_trait::async_trait;
use std::path::Path;

use super::{is_local_file_of, SourceKind, TextSource};
use crate::{Result, SuiteError};

const SERVICE: &str = "PDF text extraction";

/// Page separator in extracted text
const PAGE_BREAK: char = '\u{c}';

/// In-process PDF text extractor
#[derive(Debug, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }

    /// Check that the upload exists and is not empty
    async fn validate_file(&self, path: &Path) -> Result<()> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            std::io::Error::new(e.kind(), format!("Cannot access file {}: {}", path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(SuiteError::EmptyInput(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        if metadata.len() == 0 {
            return Err(SuiteError::EmptyInput(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Read the upload and collect the per-page text
    pub async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        tracing::debug!("Extracting text from PDF: {}", path.display());

        let bytes = fs_err::read(path)?;
        extract_pages_from_bytes(bytes).await
    }
}

/// Parse PDF bytes on a blocking thread
pub async fn extract_pages_from_bytes(bytes: Vec<u8>) -> Result<Vec<String>> {
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| SuiteError::external(SERVICE, format!("parser stopped: {}", e)))?
    .map_err(|e| SuiteError::external(SERVICE, format!("unreadable PDF: {}", e)))?;

    Ok(split_pages(&text))
}

/// Split extracted text into pages, dropping the empty tail after the last break
pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw.split(PAGE_BREAK).map(str::to_string).collect();
    if pages.last().is_some_and(|page| page.is_empty()) {
        pages.pop();
    }
    pages
}

/// Concatenate pages in order; whitespace-only output counts as no text
pub fn join_pages(pages: &[String]) -> Result<String> {
    let text = pages.concat();
    if text.trim().is_empty() {
        return Err(SuiteError::EmptyInput(
            "No text found in the PDF file.".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl TextSource for PdfTextSource {
    async fn extract_text(&self, input: &str) -> Result<String> {
        let path = Path::new(input);
        self.validate_file(path).await?;

        let pages = self.extract_pages(path).await?;
        tracing::info!("Extracted {} page(s) from {}", pages.len(), path.display());

        join_pages(&pages)
    }

    fn supports(&self, input: &str) -> bool {
        is_local_file_of(input, SourceKind::Pdf)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    fn source_name(&self) -> &'static str {
        "PDF"
    }
}
