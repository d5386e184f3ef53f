use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;

use super::captions::{TimedText, VideoCaptionInfo};
use super::{SourceKind, TextSource};
use crate::config::Config;
use crate::{Result, SuiteError};

const SERVICE: &str = "Transcript retrieval";

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Extract the 11-character video identifier from a watch, short or embed link.
///
/// The first run of 11 URL-safe characters preceded by `v=` or `/` wins.
pub fn extract_video_id(url: &str) -> Result<String> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| SuiteError::InvalidUrlFormat(url.to_string()))
}

/// Legacy identifier parsing: the text between the first and second `=`.
///
/// Breaks on links carrying more query parameters (`&t=30s` leaks into the
/// result) and on links without a `v=` parameter at all.
#[deprecated(note = "use extract_video_id; this only handles bare `watch?v=` links")]
pub fn split_video_id(url: &str) -> Result<String> {
    match url.split('=').nth(1) {
        Some(fragment) if !fragment.is_empty() => Ok(fragment.to_string()),
        _ => Err(SuiteError::InvalidUrlFormat(url.to_string())),
    }
}

/// Thumbnail image shown next to a submitted link
pub fn thumbnail_url(video_id: &str) -> String {
    format!("http://img.youtube.com/vi/{}/0.jpg", video_id)
}

/// Canonical watch link for an identifier
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Transcript source that resolves caption tracks through yt-dlp
pub struct YoutubeTranscriptSource {
    yt_dlp_path: String,
    language: String,
    client: Client,
}

impl YoutubeTranscriptSource {
    pub fn new(yt_dlp_path: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SuiteError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            yt_dlp_path: yt_dlp_path.into(),
            language: language.into(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.tools.yt_dlp, &config.app.caption_language)
    }

    /// Get caption track listing using yt-dlp
    async fn get_caption_info(&self, video_id: &str) -> Result<VideoCaptionInfo> {
        tracing::debug!("Listing caption tracks for: {}", video_id);

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--dump-json",
                "--skip-download",
                "--no-playlist",
                &watch_url(video_id),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SuiteError::external(SERVICE, format!("could not run yt-dlp: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(SuiteError::external(SERVICE, error.trim()));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| SuiteError::external(SERVICE, format!("unreadable yt-dlp output: {}", e)))
    }

    /// Download and flatten a json3 caption track
    async fn fetch_transcript(&self, track_url: &str) -> Result<String> {
        let response = self
            .client
            .get(track_url)
            .send()
            .await
            .map_err(|e| SuiteError::external(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SuiteError::external(
                SERVICE,
                format!("caption download returned HTTP {}", response.status()),
            ));
        }

        let timed: TimedText = response
            .json()
            .await
            .map_err(|e| SuiteError::external(SERVICE, format!("unreadable captions: {}", e)))?;

        Ok(timed.transcript())
    }

    /// Fetch the transcript for an already extracted identifier
    pub async fn transcript_for(&self, video_id: &str) -> Result<String> {
        let info = self.get_caption_info(video_id).await?;

        let track = info.json3_track(&self.language).ok_or_else(|| {
            SuiteError::external(
                SERVICE,
                format!(
                    "no '{}' captions available for video {} (captions may be disabled)",
                    self.language, video_id
                ),
            )
        })?;

        tracing::info!(
            "Fetching captions for {}",
            info.title.as_deref().unwrap_or(video_id)
        );

        self.fetch_transcript(&track.url).await
    }
}

#[async_trait]
impl TextSource for YoutubeTranscriptSource {
    async fn extract_text(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)?;
        self.transcript_for(&video_id).await
    }

    fn supports(&self, url: &str) -> bool {
        let url_lower = url.to_lowercase();
        url_lower.contains("youtube.com/watch")
            || url_lower.contains("youtu.be/")
            || url_lower.contains("youtube.com/embed/")
            || url_lower.contains("youtube.com/shorts/")
            || url_lower.contains("youtube.com/v/")
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Video
    }

    fn source_name(&self) -> &'static str {
        "YouTube"
    }
}
