use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::gemini::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use crate::llm::prompts::SummaryStyle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generative text provider
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Text-to-speech settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// External command-line tools
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Application settings
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Provider name (only "gemini" is supported)
    pub provider: String,

    /// API key; GOOGLE_API_KEY takes precedence when set
    pub api_key: String,

    /// Model name
    pub model: String,

    /// API base URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Spoken language code
    pub language: String,

    /// Translate TTS endpoint
    pub endpoint: String,

    /// Longest text sent in one TTS request
    pub max_chunk_chars: usize,

    /// Directory for generated audio (system temp dir if unset)
    pub audio_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// yt-dlp binary used to list caption tracks
    pub yt_dlp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for generated presentations and PDFs (current directory if unset)
    pub output_dir: Option<PathBuf>,

    /// Caption language requested from YouTube
    pub caption_language: String,

    /// Style used when none is given on the command line
    pub default_style: SummaryStyle,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key: String::new(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            max_chunk_chars: 100,
            audio_dir: None,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            yt_dlp: "yt-dlp".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            caption_language: "en".to_string(),
            default_style: SummaryStyle::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;

        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs_err::create_dir_all(parent)?;
            }
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("ai-app-suite").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.gemini.timeout_secs == 0 {
            anyhow::bail!("gemini.timeout_secs must be greater than zero");
        }

        if self.speech.max_chunk_chars == 0 {
            anyhow::bail!("speech.max_chunk_chars must be greater than zero");
        }

        url::Url::parse(&self.gemini.endpoint).context("gemini.endpoint is not a valid URL")?;
        url::Url::parse(&self.speech.endpoint).context("speech.endpoint is not a valid URL")?;

        Ok(())
    }

    /// Apply a key from the command line or environment over the file value
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.gemini.api_key = key;
        }
        self
    }

    /// Directory that generated files land in
    pub fn output_dir(&self) -> PathBuf {
        self.app
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Provider: {}", self.gemini.provider);
        println!("  Model: {}", self.gemini.model);
        println!(
            "  API Key: {}",
            if self.gemini.api_key.is_empty() {
                "(not set)"
            } else {
                "(set)"
            }
        );
        println!("  Caption Language: {}", self.app.caption_language);
        println!("  Speech Language: {}", self.speech.language);
        println!("  Default Style: {}", self.app.default_style);
        println!("  Output Directory: {}", self.output_dir().display());
    }
}
