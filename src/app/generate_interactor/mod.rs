// Generate interactor - Orchestrates rendering scripts and prompts to video

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::prompts::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Render a script file to video
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub script_path: PathBuf,
    pub output_path: PathBuf,
    pub params: GenerationParams,
    pub fps: u32,
    pub strategy: PromptStrategy,
}

/// Render a single prompt to video
#[derive(Debug, Clone)]
pub struct ClipRequest {
    /// Name used in logs and the report
    pub label: String,
    pub prompt: String,
    pub output_path: PathBuf,
    pub params: GenerationParams,
    pub fps: u32,
}

/// Summary of a finished render
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub label: String,
    pub backend: String,
    pub requests: usize,
    pub frames: usize,
    pub fps: u32,
    pub output_path: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl GenerationReport {
    /// Playback length of the encoded video in seconds
    pub fn video_seconds(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.frames as f64 / self.fps as f64
    }

    /// Wall-clock time spent rendering in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Interactor for the generation use cases
pub struct GenerateInteractor {
    generation_port: Arc<dyn GenerationPort>,
    encode_port: Arc<dyn EncodePort>,
    script_store: Arc<dyn ScriptStorePort>,
}

impl GenerateInteractor {
    /// Create new generate interactor with injected ports
    pub fn new(
        generation_port: Arc<dyn GenerationPort>,
        encode_port: Arc<dyn EncodePort>,
        script_store: Arc<dyn ScriptStorePort>,
    ) -> Self {
        Self {
            generation_port,
            encode_port,
            script_store,
        }
    }

    /// Load, validate, render and encode a script
    ///
    /// An invalid script is rejected before any backend request is made.
    pub async fn generate_from_script(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerationReport, DomainError> {
        let started_at = Utc::now();
        let script = self.script_store.load(&request.script_path).await?;
        ScriptValidator::ensure_valid(&script)?;
        info!("Loaded script: {}", script);

        let jobs = plan_script_prompts(&script, request.strategy, &request.params, request.fps);
        let mut frames = Vec::new();
        for job in &jobs {
            info!("Generating {} ({} frames)", job.label, job.frame_count);
            debug!("Prompt: {}", job.prompt);
            let params = request.params.with_frame_count(job.frame_count);
            let rendered = self.generation_port.submit(&job.prompt, &params).await?;
            frames.extend(rendered);
        }

        let output_path = self
            .encode_port
            .encode(&frames, &request.output_path, request.fps)
            .await?;

        Ok(GenerationReport {
            label: script.title.clone(),
            backend: self.generation_port.name().to_string(),
            requests: jobs.len(),
            frames: frames.len(),
            fps: request.fps,
            output_path,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Render one prompt and encode the result
    pub async fn generate_clip(&self, request: ClipRequest) -> Result<GenerationReport, DomainError> {
        let started_at = Utc::now();
        if request.prompt.trim().is_empty() {
            return Err(DomainError::BadArgs("Prompt cannot be empty".to_string()));
        }

        info!("Generating video for {}", request.label);
        let frames = self
            .generation_port
            .submit(&request.prompt, &request.params)
            .await?;
        let output_path = self
            .encode_port
            .encode(&frames, &request.output_path, request.fps)
            .await?;

        Ok(GenerationReport {
            label: request.label,
            backend: self.generation_port.name().to_string(),
            requests: 1,
            frames: frames.len(),
            fps: request.fps,
            output_path,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
