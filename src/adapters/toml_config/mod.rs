// TOML config adapter - Configuration file schema and loading

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Files probed, in order, when no config path is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["shortgen.toml", "config/shortgen.toml"];

/// Which generation backend renders prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted inference API addressed by model id
    #[default]
    Hosted,
    /// Managed model-serving endpoint addressed by URL or name
    Managed,
}

impl BackendKind {
    /// Parse backend kind from string
    pub fn parse(kind: &str) -> Result<Self, DomainError> {
        match kind.trim().to_lowercase().as_str() {
            "hosted" => Ok(BackendKind::Hosted),
            "managed" => Ok(BackendKind::Managed),
            _ => Err(DomainError::Config(format!(
                "Invalid backend: {}. Valid backends: hosted, managed",
                kind
            ))),
        }
    }
}

/// Generation backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Model id for the hosted API
    pub model: String,
    /// Base URL of the hosted API
    pub api_base: String,
    /// Bearer token for the hosted API
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Full invocation URL of the managed endpoint
    pub endpoint_url: Option<String>,
    /// Base URL combined with `endpoint_name` when no URL is given
    pub endpoint_base: Option<String>,
    pub endpoint_name: String,
    /// Bearer token for the managed endpoint
    #[serde(skip_serializing)]
    pub endpoint_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Hosted,
            model: "damo-vilab/text-to-video-ms-1.7b".to_string(),
            api_base: "https://api-inference.huggingface.co".to_string(),
            api_token: None,
            endpoint_url: None,
            endpoint_base: None,
            endpoint_name: "ltx-video-realtime-endpoint".to_string(),
            endpoint_token: None,
            timeout_secs: 600,
        }
    }
}

/// Defaults for prompts sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub negative_prompt: Option<String>,
    pub frame_count: u32,
    pub inference_steps: u32,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub fps: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            negative_prompt: params.negative_prompt,
            frame_count: params.frame_count,
            inference_steps: params.inference_steps,
            width: params.width,
            height: params.height,
            seed: params.seed,
            fps: 30,
        }
    }
}

impl GenerationConfig {
    /// Backend parameters described by this section
    pub fn to_params(&self) -> GenerationParams {
        GenerationParams {
            negative_prompt: self.negative_prompt.clone(),
            frame_count: self.frame_count,
            inference_steps: self.inference_steps,
            width: self.width,
            height: self.height,
            seed: self.seed,
        }
    }
}

/// Video encoder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// ffmpeg executable name or path
    pub ffmpeg_path: String,
    pub codec: String,
    pub preset: String,
    /// Constant Rate Factor (0-51)
    pub crf: u8,
    /// Encoder threads; all cores when unset
    pub threads: Option<usize>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            codec: "libx264".to_string(),
            preset: "medium".to_string(),
            crf: 18,
            threads: None,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub generation: GenerationConfig,
    pub encoder: EncoderConfig,
}

impl AppConfig {
    /// Check values that serde alone cannot
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.encoder.crf > 51 {
            return Err(DomainError::Config(
                "CRF value cannot exceed 51".to_string(),
            ));
        }
        if self.generation.fps == 0 {
            return Err(DomainError::Config("fps must be positive".to_string()));
        }
        if self.generation.width == 0 || self.generation.height == 0 {
            return Err(DomainError::Config(
                "Video dimensions cannot be zero".to_string(),
            ));
        }
        if self.generation.frame_count == 0 || self.generation.inference_steps == 0 {
            return Err(DomainError::Config(
                "frame_count and inference_steps must be positive".to_string(),
            ));
        }
        if self.backend.timeout_secs == 0 {
            return Err(DomainError::Config(
                "timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<AppConfig, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> Result<AppConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load the first default config file that exists, if any
    pub fn discover() -> Result<Option<AppConfig>, DomainError> {
        for candidate in DEFAULT_CONFIG_PATHS {
            let path = PathBuf::from(candidate);
            if path.is_file() {
                return Self::load(&path).map(Some);
            }
            debug!("No config file at {}", candidate);
        }
        Ok(None)
    }

    /// Render configuration as TOML, without credentials
    pub fn to_toml_string(config: &AppConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }
}
