//! Text-to-speech for generated summaries.

use async_trait::async_trait;
use futures_util::StreamExt;
use regex::Regex;
use reqwest::Client;
use std::io::Write;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::Config;
use crate::{Result, SuiteError};

const SERVICE: &str = "Speech synthesis";

static UNSPEAKABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s,.!?']").unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Strip everything except letters, digits, whitespace and `,.!?'`
pub fn clean_for_speech(text: &str) -> String {
    UNSPEAKABLE_RE.replace_all(text, "").into_owned()
}

/// Split text into request-sized pieces on word boundaries
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_chars).map(|piece| piece.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current.chars().count() + 1 + word_len
        };

        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Speech synthesis: text in, path to a playable audio file out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<PathBuf>;
}

/// Google Translate TTS client writing MP3 audio to a kept temporary file
pub struct GoogleTtsClient {
    client: Client,
    endpoint: String,
    language: String,
    max_chunk_chars: usize,
    audio_dir: PathBuf,
}

impl GoogleTtsClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SuiteError::Config(format!("Failed to build TTS HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.speech.endpoint.clone(),
            language: config.speech.language.clone(),
            max_chunk_chars: config.speech.max_chunk_chars,
            audio_dir: config
                .speech
                .audio_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir),
        })
    }

    /// Stream one chunk of audio into the output file
    async fn fetch_chunk(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        out: &mut impl Write,
    ) -> Result<u64> {
        let total = total.to_string();
        let idx = index.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.language.as_str()),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SuiteError::external(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SuiteError::external(
                SERVICE,
                format!("HTTP {} for chunk {}/{}", response.status(), index + 1, total),
            ));
        }

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(bytes) = stream.next().await {
            let bytes = bytes.map_err(|e| SuiteError::external(SERVICE, e))?;
            out.write_all(&bytes)?;
            written += bytes.len() as u64;
        }

        Ok(written)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    async fn synthesize(&self, text: &str) -> Result<PathBuf> {
        let chunks = chunk_text(text, self.max_chunk_chars);
        if chunks.is_empty() {
            return Err(SuiteError::EmptyInput("Nothing to read aloud.".to_string()));
        }

        let mut file = tempfile::Builder::new()
            .prefix("summary_")
            .suffix(".mp3")
            .tempfile_in(&self.audio_dir)?;

        // Dropping `file` on error removes the partial audio
        let mut total_bytes = 0;
        for (index, chunk) in chunks.iter().enumerate() {
            total_bytes += self.fetch_chunk(chunk, index, chunks.len(), &mut file).await?;
        }
        file.flush()?;

        let (_, path) = file.keep().map_err(|e| e.error)?;
        tracing::info!(
            "Wrote {} of audio to {}",
            crate::utils::format_file_size(total_bytes),
            path.display()
        );

        Ok(path)
    }
}
