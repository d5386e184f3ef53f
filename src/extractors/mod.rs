use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub mod captions;
pub mod local;
pub mod pdf;
pub mod youtube;

use crate::config::Config;
use crate::{Result, SuiteError};

/// Kind of input a source reads text from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Video,
    Pdf,
    #[serde(rename = "text")]
    PlainText,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Video => "video",
            SourceKind::Pdf => "pdf",
            SourceKind::PlainText => "text",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" | "text" | "md" => Some(SourceKind::PlainText),
            _ => None,
        }
    }
}

/// Trait for pulling raw text out of a video link or an uploaded document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Extract the full text behind the input
    async fn extract_text(&self, input: &str) -> Result<String>;

    /// Check if this source handles the given input
    fn supports(&self, input: &str) -> bool;

    /// What kind of input this source reads
    fn kind(&self) -> SourceKind;

    /// Human readable name of the source
    fn source_name(&self) -> &'static str;
}

/// Registry for managing multiple sources
pub struct SourceRegistry {
    sources: Vec<Box<dyn TextSource>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Create a registry with the default sources
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::empty();

        registry.register(Box::new(youtube::YoutubeTranscriptSource::from_config(config)?));
        registry.register(Box::new(pdf::PdfTextSource::new()));
        registry.register(Box::new(local::PlainTextSource::new()));

        Ok(registry)
    }

    /// Register a new source
    pub fn register(&mut self, source: Box<dyn TextSource>) {
        self.sources.push(source);
    }

    /// Find a source that supports the given input
    pub fn find_source(&self, input: &str) -> Option<&dyn TextSource> {
        self.sources
            .iter()
            .find(|source| source.supports(input))
            .map(|boxed| boxed.as_ref())
    }

    /// Find the first source of a given kind
    pub fn source_of_kind(&self, kind: SourceKind) -> Option<&dyn TextSource> {
        self.sources
            .iter()
            .find(|source| source.kind() == kind)
            .map(|boxed| boxed.as_ref())
    }

    /// Extract text using the appropriate source
    pub async fn extract_text(&self, input: &str) -> Result<String> {
        let source = self.find_source(input).ok_or_else(|| {
            SuiteError::EmptyInput(format!("Unsupported upload: {}", input))
        })?;

        tracing::debug!("Using {} source for {}", source.source_name(), input);
        source.extract_text(input).await
    }
}

/// Check if the input names a local file with the given extension kind
pub fn is_local_file_of(input: &str, kind: SourceKind) -> bool {
    if input.starts_with("http://") || input.starts_with("https://") {
        return false;
    }

    Path::new(input)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(SourceKind::from_extension)
        == Some(kind)
}

/// Validate that a link is an http(s) URL
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed =
        Url::parse(url).map_err(|_| SuiteError::InvalidUrlFormat(url.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SuiteError::InvalidUrlFormat(format!(
            "{} (URL must use HTTP or HTTPS protocol)",
            url
        )));
    }

    Ok(parsed)
}
