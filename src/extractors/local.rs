use async_trait::async_trait;
use std::path::Path;

use super::{is_local_file_of, SourceKind, TextSource};
use crate::{Result, SuiteError};

/// Plain UTF-8 text uploads, read fully into memory
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }

    /// Read a text file, rejecting invalid UTF-8 and empty content
    pub async fn read(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            std::io::Error::new(e.kind(), format!("Cannot read file {}: {}", path.display(), e))
        })?;

        let content = String::from_utf8(bytes).map_err(|_| {
            SuiteError::EmptyInput(format!("File is not valid UTF-8 text: {}", path.display()))
        })?;

        if content.trim().is_empty() {
            return Err(SuiteError::EmptyInput(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(content)
    }
}

impl Default for PlainTextSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextSource for PlainTextSource {
    async fn extract_text(&self, input: &str) -> Result<String> {
        self.read(Path::new(input)).await
    }

    fn supports(&self, input: &str) -> bool {
        is_local_file_of(input, SourceKind::PlainText)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::PlainText
    }

    fn source_name(&self) -> &'static str {
        "Text File"
    }
}
