//! FFmpeg encode adapter
//!
//! Streams RGB24 frames into an ffmpeg child process over stdin and lets it
//! encode them into the output container.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::adapters::toml_config::EncoderConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based encode adapter
pub struct FFmpegAdapter {
    config: EncoderConfig,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Common dimensions of all frames
    pub fn check_frames(frames: &[Frame]) -> Result<(u32, u32), DomainError> {
        let first = frames
            .first()
            .ok_or_else(|| DomainError::Encoding("No frames to save".to_string()))?;
        let dimensions = first.dimensions();

        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, frame)| frame.dimensions() != dimensions)
        {
            return Err(DomainError::Encoding(format!(
                "Frame {} is {}x{}, expected {}x{}",
                index,
                frame.width(),
                frame.height(),
                dimensions.0,
                dimensions.1
            )));
        }

        Ok(dimensions)
    }

    /// ffmpeg arguments for raw RGB24 input on stdin
    pub fn build_args(&self, width: u32, height: u32, fps: u32, output_path: &Path) -> Vec<String> {
        let threads = self.config.threads.unwrap_or_else(num_cpus::get).max(1);
        let mut args: Vec<String> = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s:v",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        args.push(format!("{}x{}", width, height));
        args.extend(["-r".to_string(), fps.to_string()]);
        args.extend(["-i", "-", "-an"].iter().map(|s| s.to_string()));
        // yuv420p needs even dimensions
        args.extend([
            "-vf".to_string(),
            "scale=trunc(iw/2)*2:trunc(ih/2)*2".to_string(),
            "-c:v".to_string(),
            self.config.codec.clone(),
            "-preset".to_string(),
            self.config.preset.clone(),
            "-crf".to_string(),
            self.config.crf.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-threads".to_string(),
            threads.to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
        ]);
        args.push(output_path.to_string_lossy().to_string());
        args
    }

    /// Stream frames to a spawned ffmpeg and wait for it to exit
    async fn feed_and_wait(mut child: Child, frames: &[Frame]) -> Result<(), DomainError> {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DomainError::Encoding("Failed to capture ffmpeg stdin".to_string()))?;

        let mut write_result = Ok(());
        for frame in frames {
            if let Err(e) = stdin.write_all(frame.pixels()).await {
                write_result = Err(e);
                break;
            }
        }
        if write_result.is_ok() {
            write_result = stdin.shutdown().await;
        }
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DomainError::Encoding(format!("Failed waiting for ffmpeg: {}", e)))?;

        if !output.status.success() {
            return Err(DomainError::Encoding(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        if let Err(e) = write_result {
            warn!("ffmpeg finished but frame upload failed: {}", e);
            return Err(DomainError::Encoding(format!(
                "Failed to write frames to ffmpeg: {}",
                e
            )));
        }
        Ok(())
    }

    async fn discard_partial(output_path: &Path) {
        if tokio::fs::remove_file(output_path).await.is_ok() {
            debug!("Removed partial output {}", output_path.display());
        }
    }
}

#[async_trait]
impl EncodePort for FFmpegAdapter {
    async fn encode(
        &self,
        frames: &[Frame],
        output_path: &Path,
        fps: u32,
    ) -> Result<PathBuf, DomainError> {
        let (width, height) = Self::check_frames(frames)?;
        if fps == 0 {
            return Err(DomainError::Encoding("fps must be positive".to_string()));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Encoding(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let args = self.build_args(width, height, fps, output_path);
        debug!("Running {} {}", self.config.ffmpeg_path, args.join(" "));

        let child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    DomainError::Encoding(format!(
                        "ffmpeg was not found at '{}'. Install ffmpeg or set encoder.ffmpeg_path",
                        self.config.ffmpeg_path
                    ))
                } else {
                    DomainError::Encoding(format!("Failed to start ffmpeg: {}", e))
                }
            })?;

        if let Err(e) = Self::feed_and_wait(child, frames).await {
            Self::discard_partial(output_path).await;
            return Err(e);
        }

        info!(
            "Video saved at: {} ({} frames, {}x{} @ {} fps)",
            output_path.display(),
            frames.len(),
            width,
            height,
            fps
        );
        Ok(output_path.to_path_buf())
    }
}
