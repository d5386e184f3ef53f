//! AI App Suite - summarize YouTube videos and PDF documents with Gemini,
//! read summaries aloud, and turn plain text into slides or PDF files.
//!
//! Every page of the suite is a thin chain over external services: a
//! transcript or document source, a generative text provider, a speech
//! synthesizer and two document writers. The request shaping in between
//! (video identifier parsing, prompt selection, the per-session summary)
//! lives in this crate.

pub mod cli;
pub mod config;
pub mod documents;
pub mod extractors;
pub mod llm;
pub mod output;
pub mod session;
pub mod speech;
pub mod summarize;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
#[allow(deprecated)]
pub use extractors::youtube::{extract_video_id, split_video_id};
pub use llm::prompts::SummaryStyle;
pub use session::Session;
pub use summarize::{SummaryPipeline, SummaryResult};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, SuiteError>;

/// Error types surfaced to the user
#[derive(thiserror::Error, Debug)]
pub enum SuiteError {
    #[error("Invalid YouTube URL format: {0}")]
    InvalidUrlFormat(String),

    #[error("{service} failed: {message}")]
    ExternalService {
        service: &'static str,
        message: String,
    },

    #[error("{0}")]
    EmptyInput(String),

    #[error("Unknown summarization style: {0}")]
    UnknownStyle(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SuiteError {
    pub fn external(service: &'static str, message: impl std::fmt::Display) -> Self {
        SuiteError::ExternalService {
            service,
            message: message.to_string(),
        }
    }
}
