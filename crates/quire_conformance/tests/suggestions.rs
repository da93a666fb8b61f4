//! Tests for the fix attached to unknown possible values.

use quire_conformance::{
    full_pipeline, full_pipeline_with_config, make_config_with_possible_values, month,
};
use quire_diagnostics::Solution;
use quire_values::SymbolMetadata;

fn solution(result: &quire_conformance::PipelineResult) -> &Solution {
    let w301 = result.with_code(301);
    assert_eq!(w301.len(), 1, "{:?}", result.diagnostics);
    &w301[0].solutions[0]
}

#[test]
fn near_miss_is_replaced() {
    let src = "- PossibleValue Marc: The third month.\n";
    let result = full_pipeline(month(), src);
    let solution = solution(&result);
    assert!(solution.summary.contains("Replace 'Marc' with 'March'"));

    let replacement = solution.replacement.as_ref().unwrap();
    assert_eq!(replacement.new_text, "March");
    let span = replacement.span;
    assert_eq!(&src[span.start as usize..span.end as usize], "Marc");
}

#[test]
fn distant_name_lists_known_values() {
    let result = full_pipeline(month(), "- PossibleValue April: The fourth month.\n");
    let solution = solution(&result);
    assert!(solution.replacement.is_none());
    assert!(solution.summary.contains("'April'"));

    let feb = solution.summary.find("'February'").unwrap();
    let jan = solution.summary.find("'January'").unwrap();
    let mar = solution.summary.find("'March'").unwrap();
    assert!(feb < jan && jan < mar, "{}", solution.summary);
}

#[test]
fn message_names_the_symbol() {
    let result = full_pipeline(month(), "- PossibleValue April: x\n");
    assert_eq!(
        result.with_code(301)[0].message,
        "'April' is not a known possible value for 'Month'."
    );
}

#[test]
fn symbol_title_is_used_when_present() {
    let mut metadata = month();
    metadata.title = "Calendar Month".to_string();
    let result = full_pipeline(metadata, "- PossibleValue April: x\n");
    assert!(result.with_code(301)[0].message.contains("'Calendar Month'"));
}

#[test]
fn threshold_is_inclusive() {
    // "Janu" is three edits from "January" and "Jan" is four.
    let metadata = SymbolMetadata::new("MyKit/Month", ["January"]);
    let result = full_pipeline(metadata.clone(), "- PossibleValue Janu: x\n");
    assert!(solution(&result).replacement.is_some());

    let result = full_pipeline(metadata, "- PossibleValue Jan: x\n");
    assert!(solution(&result).replacement.is_none());
}

#[test]
fn threshold_is_configurable() {
    let config = make_config_with_possible_values("max_edit_distance = 4");
    let result = full_pipeline_with_config(
        SymbolMetadata::new("MyKit/Month", ["January"]),
        "- PossibleValue Jan: x\n",
        &config,
    );
    assert_eq!(solution(&result).replacement.as_ref().unwrap().new_text, "January");
}

#[test]
fn ties_are_ambiguous_by_default() {
    let metadata = SymbolMetadata::new("MyKit/Flag", ["Cat", "Bat"]);
    let result = full_pipeline(metadata, "- PossibleValue Hat: x\n");
    let solution = solution(&result);
    assert!(solution.replacement.is_none());
    assert!(solution.summary.contains("'Bat', 'Cat'"));
}

#[test]
fn ties_follow_configured_rule() {
    let metadata = SymbolMetadata::new("MyKit/Flag", ["Cat", "Bat"]);
    for (rule, expected) in [("first_declared", "Cat"), ("alphabetical", "Bat")] {
        let config = make_config_with_possible_values(&format!("tie_break = \"{rule}\""));
        let result =
            full_pipeline_with_config(metadata.clone(), "- PossibleValue Hat: x\n", &config);
        let replacement = solution(&result).replacement.clone().unwrap();
        assert_eq!(replacement.new_text, expected, "{rule}");
    }
}

#[test]
fn no_declared_values_gives_plain_advice() {
    let metadata = SymbolMetadata::new("MyKit/Empty", Vec::<String>::new());
    let result = full_pipeline(metadata, "- PossibleValue Anything: x\n");
    let solution = solution(&result);
    assert!(solution.replacement.is_none());
    assert!(!solution.summary.contains("Known values"));
}
