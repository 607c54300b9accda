//! CLI module for shortgen
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::adapters::LogFormat;

pub mod args;
pub mod commands;

/// shortgen
///
/// Author short-video scripts and render them through text-to-video backends.
#[derive(Parser, Debug)]
#[command(name = "shortgen")]
#[command(about = "shortgen - Short-video scripts rendered by text-to-video models")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: shortgen.toml or config/shortgen.toml)
    #[arg(long, global = true, env = "SHORTGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, default_value = "info", global = true, env = "SHORTGEN_LOG_LEVEL")]
    pub log_level: String,

    /// Log output format
    #[arg(
        long,
        default_value = "pretty",
        global = true,
        value_parser = ["pretty", "compact", "json"]
    )]
    pub log_format: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a script and render it to video
    Generate(args::GenerateArgs),
    /// Render preset events or a free prompt to video
    Clip(args::ClipArgs),
    /// Check script files for timing problems
    Validate(args::ValidateArgs),
    /// Print or save a starter script
    Template(args::TemplateArgs),
    /// List preset historical events
    Presets(args::PresetsArgs),
    /// Print the effective configuration
    Config(args::ConfigArgs),
}

impl Cli {
    pub fn log_format(&self) -> Result<LogFormat> {
        Ok(LogFormat::parse(&self.log_format)?)
    }

    /// Run the selected command
    pub async fn run(self) -> Result<()> {
        let config_path = self.config.as_deref();
        match self.command {
            Commands::Generate(args) => commands::generate(config_path, args).await,
            Commands::Clip(args) => commands::clip(config_path, args).await,
            Commands::Validate(args) => commands::validate(args).await,
            Commands::Template(args) => commands::template(args).await,
            Commands::Presets(args) => commands::presets(args),
            Commands::Config(args) => commands::show_config(config_path, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_with_overrides() {
        let cli = Cli::try_parse_from([
            "shortgen",
            "generate",
            "script.json",
            "--per-section",
            "--width",
            "576",
            "--frames",
            "16",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.log_format().unwrap(), LogFormat::Json);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.script, PathBuf::from("script.json"));
                assert!(args.per_section);
                assert_eq!(args.generation.width, Some(576));
                assert_eq!(args.generation.frame_count, Some(16));
                assert_eq!(args.generation.height, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_numbers_rejected() {
        assert!(Cli::try_parse_from(["shortgen", "generate", "s.json", "--fps", "0"]).is_err());
        assert!(Cli::try_parse_from(["shortgen", "generate", "s.json", "--width", "8"]).is_err());
        assert!(Cli::try_parse_from(["shortgen", "generate", "s.json", "--crf", "60"]).is_err());
    }

    #[test]
    fn test_clip_needs_event_or_prompt() {
        assert!(Cli::try_parse_from(["shortgen", "clip"]).is_err());
        assert!(Cli::try_parse_from([
            "shortgen",
            "clip",
            "--event",
            "suffrage_movement",
            "--prompt",
            "x"
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "shortgen",
            "clip",
            "--event",
            "suffrage_movement",
            "--event",
            "civil_rights_march",
        ])
        .unwrap();
        match cli.command {
            Commands::Clip(args) => {
                assert_eq!(args.events.len(), 2);
                assert_eq!(args.style, "cinematic");
                assert_eq!(args.output_dir, PathBuf::from("output/videos"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
