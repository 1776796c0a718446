//! Configuration management
//!
//! This module handles loading and defaulting of the Forge
//! configuration. Configuration is stored in TOML format at
//! ~/.forge/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level, data directory, output directory
//! - **gemini**: Gemini API endpoint and model names
//! - **retry**: Collaborator retry policy
//! - **pacing**: Inter-call pause between platform generations
//!
//! Prompt personas and the brand voice are configuration too: the
//! [`BrandVoice`] defaults defined here are persisted into the memory
//! bank on first run and editable there afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core engine settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Gemini provider configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Retry policy for collaborator calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Upstream pacing settings
    #[serde(default)]
    pub pacing: PacingConfig,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Data directory holding the memory bank document
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory where generated content files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Gemini API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model used by most collaborators
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Higher-quality model used for blog writing
    #[serde(default = "default_gemini_pro_model")]
    pub pro_model: String,

    /// Name of the environment variable holding the API key
    /// (the key itself never lives in the config file)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per collaborator call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff delay in seconds (grows linearly per attempt)
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

/// Upstream pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause between platform generation calls, in seconds
    #[serde(default = "default_inter_call_delay_secs")]
    pub inter_call_delay_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".forge")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_pro_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    10
}

fn default_inter_call_delay_secs() -> u64 {
    2
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            pro_model: default_gemini_pro_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_call_delay_secs: default_inter_call_delay_secs(),
        }
    }
}

impl Config {
    /// Default configuration file location: ~/.forge/config.toml
    pub fn default_path() -> PathBuf {
        default_data_dir().join("config.toml")
    }

    /// Load configuration from an explicit path. Missing or invalid
    /// files are an error here: the caller asked for that exact file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Load the default-location configuration, falling back to built-in
    /// defaults when no config file exists yet.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Brand voice guidelines threaded into every generation prompt
///
/// Stored in the memory bank under `brand_voice`; the built-in default
/// is persisted there on the first pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVoice {
    pub tone: String,
    pub style: String,
    pub avoid: Vec<String>,
    pub preferences: VoicePreferences,
}

/// Structural preferences for generated content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicePreferences {
    pub sentence_length: String,
    pub paragraph_length: String,
    pub use_examples: bool,
    pub target_length: String,
}

impl Default for BrandVoice {
    fn default() -> Self {
        Self {
            tone: "professional, engaging, authoritative".to_string(),
            style: "clear, comprehensive, well-structured".to_string(),
            avoid: vec![
                "jargon".to_string(),
                "buzzwords".to_string(),
                "hyperbole".to_string(),
            ],
            preferences: VoicePreferences {
                sentence_length: "medium".to_string(),
                paragraph_length: "3-5 sentences".to_string(),
                use_examples: true,
                target_length: "1800-2000 words".to_string(),
            },
        }
    }
}

impl BrandVoice {
    /// One-line summary injected into generation prompts.
    pub fn summary(&self) -> String {
        format!("Tone: {}, Style: {}", self.tone, self.style)
    }
}
