//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::toml_config::{AppConfig, BackendKind, TomlConfigAdapter};
use crate::cli::args::GenerationOptions;

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
///
/// Environment values arrive through the same options as flags, since clap
/// reads them for any flag that was not given.
pub fn initialize_configuration(
    config_path: Option<&Path>,
    options: &GenerationOptions,
) -> Result<AppConfig> {
    let mut config = load_config_file(config_path)?;
    let overrides = apply_overrides(&mut config, options)?;
    if overrides > 0 {
        info!("Applied {} configuration overrides", overrides);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Load the requested file, or the first default file found, or defaults
fn load_config_file(config_path: Option<&Path>) -> Result<AppConfig> {
    match config_path {
        Some(path) => TomlConfigAdapter::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => {
            let config = TomlConfigAdapter::discover().context("Failed to load configuration")?;
            if config.is_none() {
                debug!("No configuration file found, using defaults");
            }
            Ok(config.unwrap_or_default())
        }
    }
}

/// Apply flag and environment values; returns how many were set
fn apply_overrides(config: &mut AppConfig, options: &GenerationOptions) -> Result<usize> {
    let mut count = 0;

    if let Some(kind) = &options.backend {
        config.backend.kind = BackendKind::parse(kind)?;
        count += 1;
    }
    count += set(&mut config.backend.model, options.model.clone());
    count += set_opt(&mut config.backend.endpoint_url, options.endpoint_url.clone());
    count += set(&mut config.backend.endpoint_name, options.endpoint_name.clone());
    count += set_opt(&mut config.backend.api_token, options.api_token.clone());
    count += set_opt(&mut config.backend.endpoint_token, options.endpoint_token.clone());

    let generation = &mut config.generation;
    count += set(&mut generation.width, options.width);
    count += set(&mut generation.height, options.height);
    count += set(&mut generation.fps, options.fps);
    count += set(&mut generation.frame_count, options.frame_count);
    count += set(&mut generation.inference_steps, options.inference_steps);
    count += set_opt(&mut generation.seed, options.seed);
    count += set_opt(&mut generation.negative_prompt, options.negative_prompt.clone());

    count += set(&mut config.encoder.crf, options.crf);

    Ok(count)
}

fn set<T>(target: &mut T, value: Option<T>) -> usize {
    match value {
        Some(value) => {
            *target = value;
            1
        }
        None => 0,
    }
}

fn set_opt<T>(target: &mut Option<T>, value: Option<T>) -> usize {
    match value {
        Some(value) => {
            *target = Some(value);
            1
        }
        None => 0,
    }
}
