// Domain rules - Script timing policies

use std::fmt;

use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// A single reason a script fails validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Script has no sections at all
    NoSections,
    /// Section times are NaN or infinite
    NonFiniteTime { section: usize },
    /// Section starts before zero
    NegativeStart { section: usize, start_time: f64 },
    /// Section ends at or before its own start
    EmptySpan {
        section: usize,
        start_time: f64,
        end_time: f64,
    },
    /// Script budget is NaN, infinite or negative
    InvalidDuration { duration: f64 },
    /// Latest section end is past the script budget
    ExceedsDuration { end_time: f64, duration: f64 },
    /// Two sections overlap once sorted by start time
    Overlap {
        first: usize,
        second: usize,
        first_end: f64,
        second_start: f64,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoSections => write!(f, "script has no sections"),
            ValidationIssue::NonFiniteTime { section } => {
                write!(f, "section {} has a non-finite time", section)
            }
            ValidationIssue::NegativeStart { section, start_time } => {
                write!(f, "section {} starts at {}s, before zero", section, start_time)
            }
            ValidationIssue::EmptySpan {
                section,
                start_time,
                end_time,
            } => write!(
                f,
                "section {} ends at {}s, not after its start at {}s",
                section, end_time, start_time
            ),
            ValidationIssue::InvalidDuration { duration } => {
                write!(f, "duration {}s is not a usable budget", duration)
            }
            ValidationIssue::ExceedsDuration { end_time, duration } => write!(
                f,
                "sections run until {}s, past the {}s duration",
                end_time, duration
            ),
            ValidationIssue::Overlap {
                first,
                second,
                first_end,
                second_start,
            } => write!(
                f,
                "section {} ends at {}s, after section {} starts at {}s",
                first, first_end, second, second_start
            ),
        }
    }
}

/// Timing rules for scripts
///
/// Section indices in issues refer to declaration order. When two sections
/// share a start time the sort keeps declaration order, which only affects
/// which pair an overlap is reported against, never the verdict.
pub struct ScriptValidator;

impl ScriptValidator {
    /// Whether the script satisfies every timing rule
    pub fn validate(script: &Script) -> bool {
        Self::diagnose(script).is_empty()
    }

    /// Every timing rule the script breaks, empty when valid
    pub fn diagnose(script: &Script) -> Vec<ValidationIssue> {
        if script.sections.is_empty() {
            return vec![ValidationIssue::NoSections];
        }

        let mut issues = Vec::new();

        for (index, section) in script.sections.iter().enumerate() {
            if !section.start_time.is_finite() || !section.end_time.is_finite() {
                issues.push(ValidationIssue::NonFiniteTime { section: index });
                continue;
            }
            if section.start_time < 0.0 {
                issues.push(ValidationIssue::NegativeStart {
                    section: index,
                    start_time: section.start_time,
                });
            }
            if section.end_time <= section.start_time {
                issues.push(ValidationIssue::EmptySpan {
                    section: index,
                    start_time: section.start_time,
                    end_time: section.end_time,
                });
            }
        }

        if !script.duration.is_finite() || script.duration < 0.0 {
            issues.push(ValidationIssue::InvalidDuration {
                duration: script.duration,
            });
        } else if let Some(latest_end) = script.latest_end() {
            if latest_end > script.duration {
                issues.push(ValidationIssue::ExceedsDuration {
                    end_time: latest_end,
                    duration: script.duration,
                });
            }
        }

        let mut order: Vec<usize> = (0..script.sections.len()).collect();
        order.sort_by(|&a, &b| {
            script.sections[a]
                .start_time
                .total_cmp(&script.sections[b].start_time)
        });
        for pair in order.windows(2) {
            let current = &script.sections[pair[0]];
            let next = &script.sections[pair[1]];
            if current.end_time > next.start_time {
                issues.push(ValidationIssue::Overlap {
                    first: pair[0],
                    second: pair[1],
                    first_end: current.end_time,
                    second_start: next.start_time,
                });
            }
        }

        issues
    }

    /// Reject invalid scripts with every issue in the message
    pub fn ensure_valid(script: &Script) -> Result<(), DomainError> {
        let issues = Self::diagnose(script);
        if issues.is_empty() {
            return Ok(());
        }
        let reasons: Vec<String> = issues.iter().map(ToString::to_string).collect();
        Err(DomainError::InvalidScript(reasons.join("; ")))
    }
}

#[cfg(test)]
mod tests;
