// Prompt construction - Turns scripts and presets into backend prompts

use serde::Serialize;

use crate::domain::model::*;

/// Style used when a preset is requested without one
pub const DEFAULT_STYLE: &str = "cinematic";

/// A curated prompt for a named historical event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPreset {
    pub key: String,
    pub description: String,
    pub prompt: String,
}

const PRESETS: &[(&str, &str, &str)] = &[
    (
        "declaration_of_independence",
        "The signing of the Declaration of Independence",
        "A grand hall in Philadelphia, 1776. Thomas Jefferson and other founding fathers gather around a wooden table, signing the Declaration of Independence. Sunlight streams through tall windows, illuminating the historic moment. Men in colonial attire with powdered wigs stand with quills in hand. The atmosphere is charged with revolutionary spirit. The scene is captured in portrait mode with dramatic lighting and careful attention to historical detail.",
    ),
    (
        "suffrage_movement",
        "Women's suffrage movement march",
        "A powerful march for women's suffrage in the early 1900s. Women in period clothing carry banners and signs demanding voting rights. The scene is filled with determination and hope. The camera captures the movement in portrait mode, emphasizing the strength and unity of the marchers. Historical buildings line the street, and the atmosphere is charged with the energy of social change.",
    ),
    (
        "civil_rights_march",
        "Martin Luther King Jr. leading the March on Washington",
        "The historic March on Washington, 1963. Martin Luther King Jr. stands at the Lincoln Memorial, addressing a vast crowd. The scene captures the iconic moment with the Washington Monument in the background. The atmosphere is one of hope and determination. The camera moves smoothly in portrait mode, capturing the emotion and scale of this pivotal moment in civil rights history.",
    ),
];

/// All curated presets, in a fixed order
pub fn presets() -> Vec<PromptPreset> {
    PRESETS
        .iter()
        .map(|(key, description, prompt)| PromptPreset {
            key: key.to_string(),
            description: description.to_string(),
            prompt: prompt.to_string(),
        })
        .collect()
}

/// Prompt for a historical event, curated when known
///
/// Unknown events get a generic recreation prompt in the requested style.
pub fn historical_prompt(event: &str, style: &str) -> PromptPreset {
    if let Some(preset) = presets().into_iter().find(|p| p.key == event) {
        return preset;
    }

    let readable = event.replace('_', " ");
    PromptPreset {
        key: event.to_string(),
        description: "Custom historical event".to_string(),
        prompt: format!(
            "A {} recreation of {} in portrait mode. The scene is captured with dramatic lighting and careful attention to historical detail, creating an immersive and authentic representation of the period.",
            style, readable
        ),
    }
}

/// How a script is split into backend requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStrategy {
    /// One request for the whole script
    #[default]
    Combined,
    /// One request per section, in chronological order
    PerSection,
}

/// A single backend request derived from a script
#[derive(Debug, Clone, PartialEq)]
pub struct PromptJob {
    pub label: String,
    pub prompt: String,
    pub frame_count: u32,
}

/// Join title and visual prompts into one prompt
pub fn combined_prompt(script: &Script) -> String {
    let parts: Vec<&str> = std::iter::once(script.title.as_str())
        .chain(
            script
                .sections_by_start()
                .into_iter()
                .map(|s| s.visual_prompt.as_str()),
        )
        .map(|part| part.trim().trim_end_matches('.'))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return String::new();
    }
    format!("{}.", parts.join(". "))
}

/// Plan the requests needed to render a script
///
/// Per-section jobs ask for enough frames to cover the section at `fps`,
/// capped at `params.frame_count`.
pub fn plan_script_prompts(
    script: &Script,
    strategy: PromptStrategy,
    params: &GenerationParams,
    fps: u32,
) -> Vec<PromptJob> {
    match strategy {
        PromptStrategy::Combined => vec![PromptJob {
            label: script.title.clone(),
            prompt: combined_prompt(script),
            frame_count: params.frame_count,
        }],
        PromptStrategy::PerSection => {
            let cap = params.frame_count.max(1);
            script
                .sections_by_start()
                .into_iter()
                .enumerate()
                .map(|(position, section)| {
                    let wanted = (section.span().max(0.0) * fps as f64).round() as u32;
                    PromptJob {
                        label: format!("section {} ({}s-{}s)", position + 1, section.start_time, section.end_time),
                        prompt: section.visual_prompt.trim().to_string(),
                        frame_count: wanted.clamp(1, cap),
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_event_uses_curated_prompt() {
        let preset = historical_prompt("civil_rights_march", DEFAULT_STYLE);
        assert_eq!(
            preset.description,
            "Martin Luther King Jr. leading the March on Washington"
        );
        assert!(preset.prompt.starts_with("The historic March on Washington, 1963."));
    }

    #[test]
    fn test_unknown_event_falls_back_to_style_template() {
        let preset = historical_prompt("bill_of_rights", "documentary");
        assert_eq!(preset.description, "Custom historical event");
        assert!(preset
            .prompt
            .starts_with("A documentary recreation of bill of rights in portrait mode."));
    }

    #[test]
    fn test_presets_are_listed_in_order() {
        let keys: Vec<String> = presets().into_iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![
                "declaration_of_independence",
                "suffrage_movement",
                "civil_rights_march"
            ]
        );
    }

    #[test]
    fn test_combined_prompt_orders_sections_chronologically() {
        let script = Script::new(
            "Signing day",
            "d",
            vec![
                ScriptSection::new(15.0, 30.0, "b", "Crowd cheering outside."),
                ScriptSection::new(0.0, 15.0, "a", "Quill touches parchment"),
            ],
            vec![],
            "c",
        );
        assert_eq!(
            combined_prompt(&script),
            "Signing day. Quill touches parchment. Crowd cheering outside."
        );
    }

    #[test]
    fn test_per_section_frames_follow_span_and_cap() {
        let script = Script::new(
            "t",
            "d",
            vec![
                ScriptSection::new(2.0, 60.0, "long", "wide shot"),
                ScriptSection::new(0.0, 0.5, "short", "close up"),
            ],
            vec![],
            "c",
        );
        let params = GenerationParams::default().with_frame_count(48);
        let jobs = plan_script_prompts(&script, PromptStrategy::PerSection, &params, 24);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].prompt, "close up");
        assert_eq!(jobs[0].frame_count, 12);
        assert_eq!(jobs[1].prompt, "wide shot");
        assert_eq!(jobs[1].frame_count, 48);
    }

    #[test]
    fn test_combined_strategy_is_single_job() {
        let template = create_template();
        let params = GenerationParams::default();
        let jobs = plan_script_prompts(&template, PromptStrategy::Combined, &params, 30);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].frame_count, params.frame_count);
        assert!(jobs[0].prompt.starts_with("Template: [Historical Event]."));
    }
}
