//! Generative text completion.
//!
//! Builds summary prompts and sends them to the Gemini API.

pub mod client;
pub mod gemini;
pub mod prompts;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
pub use prompts::{build_prompt, SummaryStyle, PDF_SUMMARY_PROMPT};
