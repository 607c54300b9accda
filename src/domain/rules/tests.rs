// Unit tests for script timing rules

use super::*;

fn script_with(spans: &[(f64, f64)], duration: f64) -> Script {
    let sections = spans
        .iter()
        .map(|&(start, end)| ScriptSection::new(start, end, "beat", "prompt"))
        .collect();
    let mut script = Script::new("t", "d", sections, vec![], "cta");
    script.duration = duration;
    script
}

fn assert_consistent(script: &Script) {
    assert_eq!(
        ScriptValidator::validate(script),
        ScriptValidator::diagnose(script).is_empty()
    );
}

#[test]
fn test_template_is_valid() {
    let template = create_template();
    assert!(ScriptValidator::validate(&template));
    assert!(ScriptValidator::ensure_valid(&template).is_ok());
}

#[test]
fn test_empty_sections_invalid() {
    let script = script_with(&[], 60.0);
    assert!(!ScriptValidator::validate(&script));
    assert_eq!(
        ScriptValidator::diagnose(&script),
        vec![ValidationIssue::NoSections]
    );
}

#[test]
fn test_exceeding_duration_invalid() {
    let script = script_with(&[(0.0, 70.0)], 60.0);
    assert!(!ScriptValidator::validate(&script));
    assert_eq!(
        ScriptValidator::diagnose(&script),
        vec![ValidationIssue::ExceedsDuration {
            end_time: 70.0,
            duration: 60.0
        }]
    );
}

#[test]
fn test_single_section_spanning_budget_valid() {
    let script = script_with(&[(0.0, 60.0)], 60.0);
    assert!(ScriptValidator::validate(&script));
}

#[test]
fn test_out_of_order_declaration_sorted() {
    let script = script_with(&[(30.0, 45.0), (0.0, 15.0), (15.0, 30.0)], 60.0);
    assert!(ScriptValidator::validate(&script));
    assert_consistent(&script);
}

#[test]
fn test_overlap_detected() {
    let script = script_with(&[(0.0, 20.0), (15.0, 30.0)], 60.0);
    assert!(!ScriptValidator::validate(&script));
    assert_eq!(
        ScriptValidator::diagnose(&script),
        vec![ValidationIssue::Overlap {
            first: 0,
            second: 1,
            first_end: 20.0,
            second_start: 15.0
        }]
    );
}

#[test]
fn test_overlap_reports_declaration_indices() {
    let script = script_with(&[(15.0, 30.0), (0.0, 20.0)], 60.0);
    match ScriptValidator::diagnose(&script).as_slice() {
        [ValidationIssue::Overlap { first, second, .. }] => {
            assert_eq!((*first, *second), (1, 0));
        }
        other => panic!("unexpected issues: {:?}", other),
    }
}

#[test]
fn test_touching_boundary_valid() {
    let script = script_with(&[(0.0, 15.0), (15.0, 30.0)], 60.0);
    assert!(ScriptValidator::validate(&script));
}

#[test]
fn test_gaps_allowed() {
    let script = script_with(&[(0.0, 10.0), (20.0, 30.0)], 60.0);
    assert!(ScriptValidator::validate(&script));
}

#[test]
fn test_inverted_or_zero_span_invalid() {
    let inverted = script_with(&[(10.0, 5.0)], 60.0);
    assert!(!ScriptValidator::validate(&inverted));
    assert_consistent(&inverted);

    let zero = script_with(&[(5.0, 5.0)], 60.0);
    assert!(matches!(
        ScriptValidator::diagnose(&zero).as_slice(),
        [ValidationIssue::EmptySpan { section: 0, .. }]
    ));
}

#[test]
fn test_negative_start_invalid() {
    let script = script_with(&[(-1.0, 10.0)], 60.0);
    assert!(!ScriptValidator::validate(&script));
}

#[test]
fn test_non_finite_time_invalid() {
    let script = script_with(&[(0.0, f64::NAN)], 60.0);
    assert!(!ScriptValidator::validate(&script));
    assert!(ScriptValidator::diagnose(&script)
        .contains(&ValidationIssue::NonFiniteTime { section: 0 }));
}

#[test]
fn test_non_finite_duration_invalid() {
    let mut script = create_template();
    script.duration = f64::NAN;
    script.sections[3].end_time = 5000.0;

    assert!(!ScriptValidator::validate(&script));
    let issues = ScriptValidator::diagnose(&script);
    assert!(matches!(
        issues.as_slice(),
        [ValidationIssue::InvalidDuration { duration }] if duration.is_nan()
    ));
    assert_consistent(&script);

    for duration in [f64::INFINITY, -1.0] {
        let script = script_with(&[(0.0, 10.0)], duration);
        assert!(!ScriptValidator::validate(&script));
    }
}

#[test]
fn test_identical_starts_overlap_regardless_of_order() {
    let a = script_with(&[(0.0, 10.0), (0.0, 5.0)], 60.0);
    let b = script_with(&[(0.0, 5.0), (0.0, 10.0)], 60.0);
    assert!(!ScriptValidator::validate(&a));
    assert!(!ScriptValidator::validate(&b));
}

#[test]
fn test_validity_recomputed_after_mutation() {
    let mut script = create_template();
    assert!(ScriptValidator::validate(&script));

    script.sections[1].end_time = 35.0;
    assert!(!ScriptValidator::validate(&script));

    script.sections[1].end_time = 30.0;
    assert!(ScriptValidator::validate(&script));
}

#[test]
fn test_ensure_valid_joins_all_reasons() {
    let script = script_with(&[(0.0, 20.0), (15.0, 70.0)], 60.0);
    let err = ScriptValidator::ensure_valid(&script).unwrap_err();
    match err {
        DomainError::InvalidScript(message) => {
            assert!(message.contains("past the 60s duration"));
            assert!(message.contains("section 0 ends at 20s"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
