//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

use crate::domain::prompts::DEFAULT_STYLE;

fn dimension(s: &str) -> Result<u32, String> {
    number_range(s, 16, 4096)
}

fn fps(s: &str) -> Result<u32, String> {
    number_range(s, 1, 120)
}

fn frame_count(s: &str) -> Result<u32, String> {
    number_range(s, 1, 1024)
}

fn inference_steps(s: &str) -> Result<u32, String> {
    number_range(s, 1, 500)
}

fn crf(s: &str) -> Result<u8, String> {
    number_range(s, 0, 51)
}

/// Backend and rendering overrides shared by commands that talk to a backend
///
/// Unset values fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Generation backend (hosted, managed)
    #[arg(long, env = "SHORTGEN_BACKEND")]
    pub backend: Option<String>,

    /// Model id on the hosted inference API
    #[arg(long, env = "SHORTGEN_MODEL")]
    pub model: Option<String>,

    /// Full invocation URL of a managed endpoint
    #[arg(long, env = "SHORTGEN_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Managed endpoint name, combined with the configured endpoint base
    #[arg(long, env = "SHORTGEN_ENDPOINT_NAME")]
    pub endpoint_name: Option<String>,

    /// Hosted inference API token
    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Managed endpoint bearer token
    #[arg(long, env = "SHORTGEN_ENDPOINT_TOKEN", hide_env_values = true)]
    pub endpoint_token: Option<String>,

    /// Video width in pixels
    #[arg(long, value_parser = dimension)]
    pub width: Option<u32>,

    /// Video height in pixels
    #[arg(long, value_parser = dimension)]
    pub height: Option<u32>,

    /// Frames per second of the encoded video
    #[arg(long, value_parser = fps)]
    pub fps: Option<u32>,

    /// Frames requested per backend call
    #[arg(long = "frames", value_parser = frame_count)]
    pub frame_count: Option<u32>,

    /// Inference steps per backend call
    #[arg(long = "steps", value_parser = inference_steps)]
    pub inference_steps: Option<u32>,

    /// Seed for reproducible generations
    #[arg(long)]
    pub seed: Option<u64>,

    /// What the backend should avoid
    #[arg(long)]
    pub negative_prompt: Option<String>,

    /// Constant Rate Factor (0-51)
    #[arg(long, value_parser = crf)]
    pub crf: Option<u8>,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Script file to render
    pub script: PathBuf,

    /// Output video path (default: output/videos/<script name>.mp4)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Send one request per section instead of one for the whole script
    #[arg(long)]
    pub per_section: bool,

    /// Write a JSON generation report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub generation: GenerationOptions,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Preset event key; repeat to render several events
    #[arg(
        long = "event",
        value_name = "KEY",
        required_unless_present = "prompt",
        conflicts_with = "prompt"
    )]
    pub events: Vec<String>,

    /// Free-form prompt to render instead of an event
    #[arg(long)]
    pub prompt: Option<String>,

    /// Style for events without a curated prompt
    #[arg(long, default_value = DEFAULT_STYLE)]
    pub style: String,

    /// Directory for rendered clips
    #[arg(long, default_value = "output/videos")]
    pub output_dir: PathBuf,

    /// Output path for a single clip
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a JSON report covering every rendered clip to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub generation: GenerationOptions,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Script files or directories to check
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the template command
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Save the template here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub generation: GenerationOptions,
}
