//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::adapters::toml_config::{AppConfig, TomlConfigAdapter};
use crate::adapters::FsScriptStore;
use crate::app::{AppContainer, ClipRequest, DefaultAppContainer, GenerateRequest, GenerationReport};
use crate::cli::args::{
    ClipArgs, ConfigArgs, GenerateArgs, PresetsArgs, TemplateArgs, ValidateArgs,
};
use crate::config_initialization::initialize_configuration;
use crate::domain::model::create_template;
use crate::domain::prompts::{historical_prompt, presets as preset_list, PromptStrategy};
use crate::domain::rules::{ScriptValidator, ValidationIssue};
use crate::ports::ScriptStorePort;

/// Execute the generate command
pub async fn generate(config_path: Option<&Path>, args: GenerateArgs) -> Result<()> {
    info!("Starting generate operation");
    info!("Script: {}", args.script.display());

    let config = initialize_configuration(config_path, &args.generation)?;
    let container = DefaultAppContainer::new(&config).context("Failed to set up backend")?;

    let output_path = match args.output {
        Some(output) => output,
        None => default_output_for(&args.script),
    };
    let strategy = if args.per_section {
        PromptStrategy::PerSection
    } else {
        PromptStrategy::Combined
    };

    let request = GenerateRequest {
        script_path: args.script.clone(),
        output_path,
        params: config.generation.to_params(),
        fps: config.generation.fps,
        strategy,
    };

    let report = container
        .generate_interactor()
        .generate_from_script(request)
        .await
        .with_context(|| format!("Failed to generate video from {}", args.script.display()))?;

    print_report(&report);
    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    info!("Generate operation completed successfully");
    Ok(())
}

/// Execute the clip command
pub async fn clip(config_path: Option<&Path>, args: ClipArgs) -> Result<()> {
    info!("Starting clip operation");

    if args.output.is_some() && args.events.len() > 1 {
        anyhow::bail!("--output can only be used with a single clip; use --output-dir for several events");
    }

    let config = initialize_configuration(config_path, &args.generation)?;
    let container = DefaultAppContainer::new(&config).context("Failed to set up backend")?;
    let interactor = container.generate_interactor();
    let requests = clip_requests(&args, &config);

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for request in requests {
        let label = request.label.clone();
        match interactor.generate_clip(request).await {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => {
                error!("Error generating video for {}: {}", label, e);
                failures.push(label);
            }
        }
    }

    if let Some(path) = &args.report {
        write_report(path, &reports)?;
    }

    if !failures.is_empty() {
        anyhow::bail!(
            "{} of {} clips failed: {}",
            failures.len(),
            failures.len() + reports.len(),
            failures.join(", ")
        );
    }

    info!("Clip operation completed successfully");
    Ok(())
}

fn clip_requests(args: &ClipArgs, config: &AppConfig) -> Vec<ClipRequest> {
    let params = config.generation.to_params();
    let fps = config.generation.fps;

    if let Some(prompt) = &args.prompt {
        let output_path = args.output.clone().unwrap_or_else(|| {
            args.output_dir
                .join(format!("prompt_{}.mp4", Utc::now().format("%Y%m%d_%H%M%S")))
        });
        return vec![ClipRequest {
            label: "prompt".to_string(),
            prompt: prompt.clone(),
            output_path,
            params,
            fps,
        }];
    }

    args.events
        .iter()
        .map(|event| {
            let preset = historical_prompt(event, &args.style);
            info!("Event: {} ({})", preset.key, preset.description);
            let output_path = args
                .output
                .clone()
                .unwrap_or_else(|| args.output_dir.join(format!("{}.mp4", event)));
            ClipRequest {
                label: preset.key,
                prompt: preset.prompt,
                output_path,
                params: params.clone(),
                fps,
            }
        })
        .collect()
}

/// Outcome of validating one file
#[derive(Debug, Serialize)]
struct ValidationEntry {
    path: PathBuf,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    issues: Vec<ValidationIssue>,
}

/// Execute the validate command
pub async fn validate(args: ValidateArgs) -> Result<()> {
    let files = collect_script_files(&args.paths)?;
    if files.is_empty() {
        anyhow::bail!("No script files found");
    }

    let store = FsScriptStore::new();
    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        let entry = match store.load(&path).await {
            Ok(script) => {
                let issues = ScriptValidator::diagnose(&script);
                ValidationEntry {
                    path,
                    valid: issues.is_empty(),
                    title: Some(script.title),
                    error: None,
                    issues,
                }
            }
            Err(e) => ValidationEntry {
                path,
                valid: false,
                title: None,
                error: Some(e.to_string()),
                issues: Vec::new(),
            },
        };
        entries.push(entry);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize validation results to JSON")?;
        println!("{}", json);
    } else {
        display_validation(&entries);
    }

    let failed = entries.iter().filter(|e| !e.valid).count();
    if failed > 0 {
        anyhow::bail!("{} of {} scripts failed validation", failed, entries.len());
    }
    Ok(())
}

/// Files named directly, plus every `*.json` under named directories
fn collect_script_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let before = files.len();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk directory {}", path.display()))?;
            let is_json = entry.path().extension().map_or(false, |ext| ext == "json");
            if entry.file_type().is_file() && is_json {
                files.push(entry.into_path());
            }
        }
        if files.len() == before {
            warn!("No script files in {}", path.display());
        }
    }
    Ok(files)
}

fn display_validation(entries: &[ValidationEntry]) {
    for entry in entries {
        match (&entry.error, &entry.title) {
            (Some(error), _) => println!("✗ {}: {}", entry.path.display(), error),
            (None, Some(title)) if entry.valid => {
                println!("✓ {}: {}", entry.path.display(), title)
            }
            (None, title) => {
                println!(
                    "✗ {}: {}",
                    entry.path.display(),
                    title.as_deref().unwrap_or("untitled")
                );
                for issue in &entry.issues {
                    println!("    - {}", issue);
                }
            }
        }
    }
}

/// Execute the template command
pub async fn template(args: TemplateArgs) -> Result<()> {
    let template = create_template();

    match args.output {
        Some(path) => {
            if path.exists() && !args.force {
                anyhow::bail!(
                    "{} already exists; pass --force to overwrite it",
                    path.display()
                );
            }
            FsScriptStore::new()
                .save(&template, &path)
                .await
                .context("Failed to save template")?;
            println!("Template saved to {}", path.display());
        }
        None => println!("{}", template.to_json()?),
    }
    Ok(())
}

/// Execute the presets command
pub fn presets(args: PresetsArgs) -> Result<()> {
    let presets = preset_list();
    if args.json {
        let json = serde_json::to_string_pretty(&presets)
            .context("Failed to serialize presets to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    for preset in presets {
        println!("{}", preset.key);
        println!("  {}", preset.description);
    }
    Ok(())
}

/// Execute the config command
pub fn show_config(config_path: Option<&Path>, args: ConfigArgs) -> Result<()> {
    let config = initialize_configuration(config_path, &args.generation)?;
    print!("{}", TomlConfigAdapter::to_toml_string(&config)?);
    Ok(())
}

fn default_output_for(script: &Path) -> PathBuf {
    let stem = script
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());
    PathBuf::from("output/videos").join(format!("{}.mp4", stem))
}

fn print_report(report: &GenerationReport) {
    println!(
        "Video saved to {} ({} frames, {:.1}s of video, {} request(s) to {} backend in {:.1}s)",
        report.output_path.display(),
        report.frames,
        report.video_seconds(),
        report.requests,
        report.backend,
        report.elapsed_seconds()
    );
}

fn write_report<T: Serialize + ?Sized>(path: &Path, report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::GenerationOptions;

    fn clip_args(events: &[&str], output: Option<&str>) -> ClipArgs {
        ClipArgs {
            events: events.iter().map(|e| e.to_string()).collect(),
            prompt: None,
            style: "documentary".to_string(),
            output_dir: PathBuf::from("renders"),
            output: output.map(PathBuf::from),
            report: None,
            generation: GenerationOptions::default(),
        }
    }

    #[test]
    fn test_default_output_uses_script_stem() {
        assert_eq!(
            default_output_for(Path::new("scripts/bill_of_rights.json")),
            PathBuf::from("output/videos/bill_of_rights.mp4")
        );
    }

    #[test]
    fn test_clip_requests_per_event() {
        let config = AppConfig::default();
        let requests = clip_requests(&clip_args(&["suffrage_movement", "louisiana_purchase"], None), &config);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].output_path, PathBuf::from("renders/suffrage_movement.mp4"));
        assert!(requests[0].prompt.starts_with("A powerful march for women's suffrage"));
        assert!(requests[1]
            .prompt
            .starts_with("A documentary recreation of louisiana purchase"));
        assert_eq!(requests[1].fps, config.generation.fps);
    }

    #[test]
    fn test_single_event_honors_output() {
        let requests = clip_requests(
            &clip_args(&["civil_rights_march"], Some("march.mp4")),
            &AppConfig::default(),
        );
        assert_eq!(requests[0].output_path, PathBuf::from("march.mp4"));
    }

    #[test]
    fn test_collect_walks_directories_for_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("nested/a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_script_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "json"));
    }

    #[tokio::test]
    async fn test_validate_fails_on_bad_script() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "not json").unwrap();
        let result = validate(ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            json: true,
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_template_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.json");
        std::fs::write(&path, "keep me").unwrap();

        let result = template(TemplateArgs {
            output: Some(path.clone()),
            force: false,
        })
        .await;
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        template(TemplateArgs {
            output: Some(path.clone()),
            force: true,
        })
        .await
        .unwrap();
        assert!(ScriptValidator::validate(
            &crate::domain::model::Script::from_json(&std::fs::read_to_string(&path).unwrap())
                .unwrap()
        ));
    }
}
