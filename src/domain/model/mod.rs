// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Default audience descriptor when a script does not name one
pub const DEFAULT_TARGET_AUDIENCE: &str = "13-18";

/// Default runtime budget in seconds
pub const DEFAULT_DURATION: f64 = 60.0;

/// Negative prompt sent when the caller does not supply one
pub const DEFAULT_NEGATIVE_PROMPT: &str =
    "worst quality, inconsistent motion, blurry, jittery, distorted";

fn default_target_audience() -> String {
    DEFAULT_TARGET_AUDIENCE.to_string()
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

/// One timed beat of a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
    /// Start of the beat in seconds
    pub start_time: f64,
    /// End of the beat in seconds
    pub end_time: f64,
    /// Narrative content of the beat
    pub content: String,
    /// Prompt for video generation
    pub visual_prompt: String,
    /// Prompt for audio or narration, serialized as `null` when absent
    #[serde(default)]
    pub audio_prompt: Option<String>,
}

impl ScriptSection {
    /// Create a section without audio direction
    pub fn new(
        start_time: f64,
        end_time: f64,
        content: impl Into<String>,
        visual_prompt: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            content: content.into(),
            visual_prompt: visual_prompt.into(),
            audio_prompt: None,
        }
    }

    /// Attach an audio prompt
    pub fn with_audio_prompt(mut self, audio_prompt: impl Into<String>) -> Self {
        self.audio_prompt = Some(audio_prompt.into());
        self
    }

    /// Length of the beat in seconds (negative for inverted sections)
    pub fn span(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// A complete short-video script
///
/// Field order here is the key order of the interchange format, so it must
/// not be rearranged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub title: String,
    pub description: String,
    pub sections: Vec<ScriptSection>,
    pub hashtags: Vec<String>,
    pub call_to_action: String,
    #[serde(default = "default_target_audience")]
    pub target_audience: String,
    /// Upper bound on total runtime in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,
}

impl Script {
    /// Create a script with the default audience and duration
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        sections: Vec<ScriptSection>,
        hashtags: Vec<String>,
        call_to_action: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            sections,
            hashtags,
            call_to_action: call_to_action.into(),
            target_audience: default_target_audience(),
            duration: DEFAULT_DURATION,
        }
    }

    /// Serialize to the pretty-printed JSON interchange format
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::MalformedScript(format!("Failed to serialize script: {}", e)))
    }

    /// Parse the JSON interchange format
    ///
    /// Missing `target_audience`, `duration` and per-section `audio_prompt`
    /// take their defaults; any other missing field fails the whole parse.
    pub fn from_json(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text).map_err(|e| DomainError::MalformedScript(e.to_string()))
    }

    /// Sections in chronological order; ties keep declaration order
    pub fn sections_by_start(&self) -> Vec<&ScriptSection> {
        let mut sorted: Vec<&ScriptSection> = self.sections.iter().collect();
        sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        sorted
    }

    /// Latest end time across all sections
    pub fn latest_end(&self) -> Option<f64> {
        self.sections
            .iter()
            .map(|s| s.end_time)
            .reduce(f64::max)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} sections, {:.1}s budget)",
            self.title,
            self.sections.len(),
            self.duration
        )
    }
}

/// Build the starter script authors copy and fill in
pub fn create_template() -> Script {
    Script::new(
        "Template: [Historical Event]",
        "A 60-second story about [historical event] and its impact on [relevant right/amendment].",
        vec![
            ScriptSection::new(
                0.0,
                15.0,
                "Hook: [Engaging opening]",
                "Cinematic shot of [scene description]",
            )
            .with_audio_prompt("Background music: [mood/type]"),
            ScriptSection::new(
                15.0,
                30.0,
                "Context: [Historical background]",
                "Historical footage or recreation of [event]",
            )
            .with_audio_prompt("Narration: [tone/style]"),
            ScriptSection::new(
                30.0,
                45.0,
                "Impact: [Why it matters today]",
                "Modern connection to [historical event]",
            )
            .with_audio_prompt("Music shift to [mood]"),
            ScriptSection::new(
                45.0,
                60.0,
                "Call to Action: [Engagement prompt]",
                "Text overlay with question or challenge",
            )
            .with_audio_prompt("Final music cue"),
        ],
        vec![
            "#AmericanHistory".to_string(),
            "#BillOfRights".to_string(),
            "#Education".to_string(),
        ],
        "What would you do in this situation? Share your thoughts below! 👇",
    )
}

/// Parameters sent to a generation backend with each prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub negative_prompt: Option<String>,
    pub frame_count: u32,
    pub inference_steps: u32,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            negative_prompt: Some(DEFAULT_NEGATIVE_PROMPT.to_string()),
            frame_count: 24,
            inference_steps: 50,
            width: 1080,
            height: 1920,
            seed: None,
        }
    }
}

impl GenerationParams {
    /// Same parameters with a different frame count
    pub fn with_frame_count(&self, frame_count: u32) -> Self {
        Self {
            frame_count,
            ..self.clone()
        }
    }

    /// Negative prompt to send, falling back to the default
    pub fn effective_negative_prompt(&self) -> &str {
        self.negative_prompt
            .as_deref()
            .unwrap_or(DEFAULT_NEGATIVE_PROMPT)
    }
}

/// A single RGB24 image, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Bytes per pixel
    pub const CHANNELS: usize = 3;

    /// Create a frame, rejecting buffers that do not match the dimensions
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::BadArgs("Frame dimensions cannot be zero".to_string()));
        }
        let expected = width as usize * height as usize * Self::CHANNELS;
        if pixels.len() != expected {
            return Err(DomainError::BadArgs(format!(
                "Frame buffer has {} bytes, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
