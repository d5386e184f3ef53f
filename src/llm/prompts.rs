use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::SuiteError;

/// Instruction used by the PDF summarizer page
pub const PDF_SUMMARY_PROMPT: &str = "You are an AI text summarizer. Please summarize the following text \
into important points within 250 words. Here is the text: ";

/// Summarization style picked for a video
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryStyle {
    /// Clear bullet points, up to 250 words
    #[default]
    BulletPoints,
    /// One detailed paragraph, up to 250 words
    DetailedParagraph,
    /// Brief summary, up to 100 words
    ShortSummary,
    /// Key points and action items, up to 150 words
    KeyHighlights,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 4] = [
        SummaryStyle::BulletPoints,
        SummaryStyle::DetailedParagraph,
        SummaryStyle::ShortSummary,
        SummaryStyle::KeyHighlights,
    ];

    /// Label shown in the style picker
    pub fn label(&self) -> &'static str {
        match self {
            SummaryStyle::BulletPoints => "Bullet Points",
            SummaryStyle::DetailedParagraph => "Detailed Paragraph",
            SummaryStyle::ShortSummary => "Short Summary",
            SummaryStyle::KeyHighlights => "Key Highlights",
        }
    }

    /// Word ceiling embedded in the instruction
    pub fn word_limit(&self) -> u32 {
        match self {
            SummaryStyle::BulletPoints => 250,
            SummaryStyle::DetailedParagraph => 250,
            SummaryStyle::ShortSummary => 100,
            SummaryStyle::KeyHighlights => 150,
        }
    }

    /// Instruction prefix placed in front of the transcript
    pub fn prompt(&self) -> &'static str {
        match self {
            SummaryStyle::BulletPoints => {
                "Summarize the video in clear bullet points (max 250 words): "
            }
            SummaryStyle::DetailedParagraph => {
                "Provide a detailed paragraph summarizing the video (max 250 words): "
            }
            SummaryStyle::ShortSummary => "Summarize the video briefly (max 100 words): ",
            SummaryStyle::KeyHighlights => {
                "Highlight key points and action items from the video (max 150 words): "
            }
        }
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SummaryStyle {
    type Err = SuiteError;

    /// Accepts picker labels ("Bullet Points"), type names ("BulletPoints")
    /// and CLI names ("bullet-points").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "bulletpoints" => Ok(SummaryStyle::BulletPoints),
            "detailedparagraph" => Ok(SummaryStyle::DetailedParagraph),
            "shortsummary" => Ok(SummaryStyle::ShortSummary),
            "keyhighlights" => Ok(SummaryStyle::KeyHighlights),
            _ => Err(SuiteError::UnknownStyle(s.to_string())),
        }
    }
}

/// Full request text: instruction prefix followed directly by the source text
pub fn build_prompt(prefix: &str, text: &str) -> String {
    let mut prompt = String::with_capacity(prefix.len() + text.len());
    prompt.push_str(prefix);
    prompt.push_str(text);
    prompt
}
