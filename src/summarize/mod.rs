use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::extractors::youtube::{extract_video_id, thumbnail_url, watch_url};
use crate::extractors::{SourceKind, SourceRegistry};
use crate::llm::prompts::{build_prompt, SummaryStyle, PDF_SUMMARY_PROMPT};
use crate::llm::{build_provider, LlmProvider};
use crate::session::Session;
use crate::speech::{clean_for_speech, GoogleTtsClient, SpeechSynthesizer};
use crate::utils::spinner;
use crate::{Result, SuiteError};

/// A generated summary with where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    /// The generated summary text
    pub summary: String,

    /// Link or file the text was taken from
    pub source: String,

    /// Kind of source
    pub source_kind: SourceKind,

    /// Style used for video summaries
    pub style: Option<SummaryStyle>,

    /// Video identifier, for video summaries
    pub video_id: Option<String>,

    /// Thumbnail link, for video summaries
    pub thumbnail_url: Option<String>,

    pub metadata: SummaryMetadata,
}

/// Metadata about the generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// Provider that produced the text
    pub provider: String,

    /// Length of the source text in characters
    pub source_chars: usize,

    /// Time spent extracting and generating, in seconds
    pub processing_duration: f64,

    /// Timestamp when the summary was produced
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Source text -> instruction prefix -> provider, plus read-aloud of the session summary
pub struct SummaryPipeline {
    llm: Box<dyn LlmProvider>,
    sources: SourceRegistry,
    speech: Box<dyn SpeechSynthesizer>,
    quiet: bool,
}

impl SummaryPipeline {
    pub fn new(
        llm: Box<dyn LlmProvider>,
        sources: SourceRegistry,
        speech: Box<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            llm,
            sources,
            speech,
            quiet: false,
        }
    }

    /// Build the pipeline with the configured provider and default sources
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_provider(config)?,
            SourceRegistry::from_config(config)?,
            Box::new(GoogleTtsClient::from_config(config)?),
        ))
    }

    /// Hide progress spinners
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Summarize a YouTube video and remember the result in the session.
    ///
    /// The session is only written once the provider has returned text.
    pub async fn summarize_video(
        &self,
        url: &str,
        style: SummaryStyle,
        session: &mut Session,
    ) -> Result<SummaryResult> {
        let started = Instant::now();
        let video_id = extract_video_id(url)?;
        tracing::info!("Summarizing video {} as {}", video_id, style);

        let source = self.sources.source_of_kind(SourceKind::Video).ok_or_else(|| {
            SuiteError::Config("no transcript source is registered".to_string())
        })?;

        let progress = spinner("Fetching transcript...", self.quiet);
        let transcript = source.extract_text(&watch_url(&video_id)).await;
        progress.finish_and_clear();
        let transcript = transcript?;

        if transcript.trim().is_empty() {
            return Err(SuiteError::EmptyInput(format!(
                "No transcript text found for video {}",
                video_id
            )));
        }

        let summary = self.generate(style.prompt(), &transcript).await?;
        session.set(summary.clone());

        Ok(SummaryResult {
            summary,
            source: url.to_string(),
            source_kind: SourceKind::Video,
            style: Some(style),
            thumbnail_url: Some(thumbnail_url(&video_id)),
            video_id: Some(video_id),
            metadata: self.metadata(transcript.chars().count(), started),
        })
    }

    /// Read the text out of an uploaded document
    pub async fn document_text(&self, path: &str) -> Result<String> {
        let progress = spinner("Extracting text...", self.quiet);
        let text = self.sources.extract_text(path).await;
        progress.finish_and_clear();

        let text = text?;
        if text.trim().is_empty() {
            return Err(SuiteError::EmptyInput(format!("No text found in {}", path)));
        }
        Ok(text)
    }

    /// Summarize extracted document text with the PDF summarizer instruction
    pub async fn summarize_document_text(
        &self,
        path: &str,
        text: &str,
        started: Instant,
    ) -> Result<SummaryResult> {
        let kind = self
            .sources
            .find_source(path)
            .map(|source| source.kind())
            .unwrap_or(SourceKind::Pdf);

        let summary = self.generate(PDF_SUMMARY_PROMPT, text).await?;

        Ok(SummaryResult {
            summary,
            source: path.to_string(),
            source_kind: kind,
            style: None,
            video_id: None,
            thumbnail_url: None,
            metadata: self.metadata(text.chars().count(), started),
        })
    }

    /// Speak the session's summary and return the audio file path
    pub async fn listen(&self, session: &Session) -> Result<PathBuf> {
        let summary = session.get().ok_or_else(|| {
            SuiteError::EmptyInput("No summary available yet. Generate one first.".to_string())
        })?;

        let cleaned = clean_for_speech(summary);
        if cleaned.trim().is_empty() {
            return Err(SuiteError::EmptyInput(
                "The summary has nothing that can be read aloud.".to_string(),
            ));
        }

        let progress = spinner("Synthesizing speech...", self.quiet);
        let audio = self.speech.synthesize(&cleaned).await;
        progress.finish_and_clear();
        audio
    }

    async fn generate(&self, prefix: &str, text: &str) -> Result<String> {
        let prompt = build_prompt(prefix, text);
        tracing::debug!("Prompt is {} characters", prompt.len());

        let progress = spinner("Generating summary...", self.quiet);
        let summary = self.llm.generate(&prompt).await;
        progress.finish_and_clear();

        let summary = summary?;
        tracing::info!("{} returned {} characters", self.llm.name(), summary.len());
        Ok(summary)
    }

    fn metadata(&self, source_chars: usize, started: Instant) -> SummaryMetadata {
        SummaryMetadata {
            provider: self.llm.name().to_string(),
            source_chars,
            processing_duration: started.elapsed().as_secs_f64(),
            generated_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::MockTextSource;
    use crate::llm::client::MockLlmProvider;
    use crate::speech::MockSpeechSynthesizer;

    fn video_source(transcript: &'static str) -> MockTextSource {
        let mut source = MockTextSource::new();
        source.expect_kind().return_const(SourceKind::Video);
        source
            .expect_supports()
            .returning(|input| input.contains("youtube.com"));
        source.expect_source_name().return_const("YouTube");
        source
            .expect_extract_text()
            .withf(|url| url == "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .returning(move |_| Ok(transcript.to_string()));
        source
    }

    fn pipeline(
        llm: MockLlmProvider,
        source: Option<MockTextSource>,
        speech: MockSpeechSynthesizer,
    ) -> SummaryPipeline {
        let mut sources = SourceRegistry::empty();
        if let Some(source) = source {
            sources.register(Box::new(source));
        }
        SummaryPipeline::new(Box::new(llm), sources, Box::new(speech)).quiet(true)
    }

    fn named_llm() -> MockLlmProvider {
        let mut llm = MockLlmProvider::new();
        llm.expect_name().return_const("mock");
        llm
    }

    #[tokio::test]
    async fn video_summary_is_prefix_plus_transcript_and_lands_in_session() {
        let mut llm = named_llm();
        llm.expect_generate()
            .withf(|prompt| {
                prompt == "Summarize the video briefly (max 100 words): never gonna give you up"
            })
            .times(1)
            .returning(|_| Ok("A song about commitment.".to_string()));

        let pipeline = pipeline(
            llm,
            Some(video_source("never gonna give you up")),
            MockSpeechSynthesizer::new(),
        );

        let mut session = Session::new();
        let result = pipeline
            .summarize_video(
                "https://youtu.be/dQw4w9WgXcQ",
                SummaryStyle::ShortSummary,
                &mut session,
            )
            .await
            .unwrap();

        assert_eq!(result.summary, "A song about commitment.");
        assert_eq!(result.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(
            result.thumbnail_url.as_deref(),
            Some("http://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg")
        );
        assert_eq!(result.metadata.source_chars, 23);
        assert_eq!(session.get(), Some("A song about commitment."));
    }

    #[tokio::test]
    async fn invalid_url_fails_before_any_service_call() {
        let pipeline = pipeline(
            MockLlmProvider::new(),
            None,
            MockSpeechSynthesizer::new(),
        );

        let mut session = Session::new();
        let err = pipeline
            .summarize_video("https://example.com/", SummaryStyle::BulletPoints, &mut session)
            .await
            .unwrap_err();

        assert!(matches!(err, SuiteError::InvalidUrlFormat(_)));
        assert!(!session.has_summary());
    }

    #[tokio::test]
    async fn provider_failure_leaves_previous_summary_untouched() {
        let mut llm = named_llm();
        llm.expect_generate()
            .returning(|_| Err(SuiteError::external("Gemini", "quota or rate limit exceeded")));

        let pipeline = pipeline(llm, Some(video_source("words")), MockSpeechSynthesizer::new());

        let mut session = Session::new();
        session.set("earlier summary");
        let err = pipeline
            .summarize_video(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                SummaryStyle::KeyHighlights,
                &mut session,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SuiteError::ExternalService { service: "Gemini", .. }));
        assert_eq!(session.get(), Some("earlier summary"));
    }

    #[tokio::test]
    async fn empty_transcript_is_empty_input() {
        let pipeline = pipeline(
            MockLlmProvider::new(),
            Some(video_source("   ")),
            MockSpeechSynthesizer::new(),
        );

        let mut session = Session::new();
        let err = pipeline
            .summarize_video(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
                SummaryStyle::BulletPoints,
                &mut session,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::EmptyInput(_)));
    }

    #[tokio::test]
    async fn document_summary_uses_pdf_instruction() {
        let mut source = MockTextSource::new();
        source.expect_kind().return_const(SourceKind::Pdf);
        source.expect_supports().returning(|input| input.ends_with(".pdf"));
        source.expect_source_name().return_const("PDF");
        source
            .expect_extract_text()
            .returning(|_| Ok("Quarterly revenue grew.".to_string()));

        let mut llm = named_llm();
        llm.expect_generate()
            .withf(|prompt| {
                prompt.starts_with("You are an AI text summarizer.")
                    && prompt.ends_with("Here is the text: Quarterly revenue grew.")
            })
            .returning(|_| Ok("- Revenue up".to_string()));

        let pipeline = pipeline(llm, Some(source), MockSpeechSynthesizer::new());
        let started = Instant::now();
        let text = pipeline.document_text("report.pdf").await.unwrap();
        let result = pipeline
            .summarize_document_text("report.pdf", &text, started)
            .await
            .unwrap();

        assert_eq!(result.summary, "- Revenue up");
        assert_eq!(result.source_kind, SourceKind::Pdf);
        assert_eq!(result.metadata.source_chars, 23);
        assert!(result.style.is_none());
        assert!(result.video_id.is_none());
    }

    #[tokio::test]
    async fn blank_document_text_is_rejected_before_generation() {
        let mut source = MockTextSource::new();
        source.expect_kind().return_const(SourceKind::PlainText);
        source.expect_supports().returning(|input| input.ends_with(".txt"));
        source.expect_source_name().return_const("Text");
        source
            .expect_extract_text()
            .returning(|_| Ok(" \n ".to_string()));

        let pipeline = pipeline(MockLlmProvider::new(), Some(source), MockSpeechSynthesizer::new());
        let err = pipeline.document_text("notes.txt").await.unwrap_err();
        assert!(matches!(err, SuiteError::EmptyInput(_)));
    }

    #[tokio::test]
    async fn listen_speaks_cleaned_session_summary() {
        let mut speech = MockSpeechSynthesizer::new();
        speech
            .expect_synthesize()
            .withf(|text| text == "Hello, World! 100 done")
            .times(1)
            .returning(|_| Ok(PathBuf::from("/tmp/summary.mp3")));

        let pipeline = pipeline(MockLlmProvider::new(), None, speech);

        let mut session = Session::new();
        session.set("Hello, World! 100% <done>");
        let path = pipeline.listen(&session).await.unwrap();
        assert_eq!(path, PathBuf::from("/tmp/summary.mp3"));
    }

    #[tokio::test]
    async fn listen_without_summary_is_empty_input() {
        let pipeline = pipeline(MockLlmProvider::new(), None, MockSpeechSynthesizer::new());
        let err = pipeline.listen(&Session::new()).await.unwrap_err();
        assert!(matches!(err, SuiteError::EmptyInput(_)));

        let mut session = Session::new();
        session.set("<>%$#");
        let err = pipeline.listen(&session).await.unwrap_err();
        assert!(matches!(err, SuiteError::EmptyInput(_)));
    }
}
