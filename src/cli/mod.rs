use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::llm::prompts::SummaryStyle;

#[derive(Parser)]
#[command(
    name = "ai-suite",
    about = "AI App Suite - summarize YouTube videos and PDFs, listen to summaries, and build slides or PDFs from text",
    version,
    long_about = "A command-line suite of AI helpers. Summarizes YouTube videos from their captions and PDF documents from their text using Google Gemini, reads summaries aloud, and turns plain text into PowerPoint decks or PDF files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Gemini API key (overrides the config file)
    #[arg(long, env = "GOOGLE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe the tools in the suite
    About,

    /// Summarize a YouTube video from its captions
    Youtube {
        /// YouTube video link (watch, youtu.be, embed or shorts)
        #[arg(value_name = "URL")]
        url: String,

        /// Summarization style (defaults to the configured style)
        #[arg(short, long, value_enum)]
        style: Option<SummaryStyle>,

        /// Read the summary aloud and save the audio
        #[arg(long)]
        listen: bool,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Summarize an uploaded PDF document
    Pdf {
        /// PDF file to summarize
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the extracted text before summarizing
        #[arg(long)]
        show_text: bool,

        /// Only extract the text, do not summarize
        #[arg(long)]
        extract_only: bool,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Turn text into a downloadable PDF
    ChatToPdf {
        /// Text to write into the PDF
        #[arg(value_name = "TEXT", required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Where to write the PDF (defaults to chat_to_pdf.pdf in the output directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build a PowerPoint presentation
    Ppt {
        #[command(subcommand)]
        source: PptSource,

        /// Where to write the deck (defaults to generated_ppt.pptx in the output directory)
        #[arg(short, long, value_name = "FILE", global = true)]
        output: Option<PathBuf>,
    },

    /// List summarization styles
    Styles,

    /// Show or create the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum PptSource {
    /// One slide from a title and its content
    Manual {
        /// Slide title
        #[arg(long)]
        title: String,

        /// Slide content; each line becomes a paragraph
        #[arg(long)]
        content: String,
    },

    /// One slide per pair of lines (title, then content) in a .txt file
    File {
        /// Text file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// Markdown with a source header
    Markdown,
    /// JSON with metadata
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
