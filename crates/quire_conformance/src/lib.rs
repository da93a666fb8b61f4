//! Conformance test helpers for Quire.
//!
//! Provides shared pipeline functions that run authored documentation text
//! through the full possible-values pass (parse → reconcile → diagnose →
//! resolve → route) and return structured results for assertion in
//! integration tests.

#![warn(missing_docs)]

use quire_config::{load_config_from_str, QuireConfig};
use quire_diagnostics::{Diagnostic, DiagnosticSink};
use quire_source::SourceDb;
use quire_values::{
    DocBody, PossibleValuesPass, ReferenceIndex, SymbolInput, SymbolMetadata, SymbolOutput,
};

/// The module every test symbol lives in.
pub const MODULE: &str = "MyKit";

/// Result of running the full pass over one symbol.
pub struct PipelineResult {
    /// The reconciled symbol.
    pub output: SymbolOutput,
    /// All diagnostics emitted during the pass, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Returns the diagnostics with the given code number.
    pub fn with_code(&self, number: u16) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code.number == number)
            .collect()
    }
}

/// Creates a minimal `QuireConfig` for the test module.
pub fn make_config() -> QuireConfig {
    make_config_with_possible_values("")
}

/// Creates a `QuireConfig` whose `[possible_values]` section holds `section`.
pub fn make_config_with_possible_values(section: &str) -> QuireConfig {
    let toml_str = format!(
        r#"
[project]
name = "{MODULE}"

[possible_values]
{section}
"#
    );
    load_config_from_str(&toml_str).unwrap()
}

/// The `MyKit/Month` symbol declaring January through March.
pub fn month() -> SymbolMetadata {
    SymbolMetadata::new("MyKit/Month", ["January", "February", "March"])
}

/// A reference index knowing `MyKit`, `MyKit/Month`, `MyKit/Weekday`, and the
/// `Calendars` article.
pub fn make_index() -> ReferenceIndex {
    let mut index = ReferenceIndex::new();
    index.add_symbol(MODULE);
    index.add_symbol("MyKit/Month");
    index.add_symbol("MyKit/Weekday");
    index.add_article("Calendars");
    index
}

/// Runs the full pass on one primary documentation body.
pub fn full_pipeline(metadata: SymbolMetadata, body: &str) -> PipelineResult {
    full_pipeline_with_config(metadata, body, &make_config())
}

/// Runs the full pass on one primary body with a custom config.
pub fn full_pipeline_with_config(
    metadata: SymbolMetadata,
    body: &str,
    config: &QuireConfig,
) -> PipelineResult {
    full_pipeline_variants(metadata, &[(None, body)], config)
}

/// Runs the full pass on several bodies of one symbol.
///
/// Each entry in `bodies` is `(variant, text)`; `None` marks the primary.
pub fn full_pipeline_variants(
    metadata: SymbolMetadata,
    bodies: &[(Option<&str>, &str)],
    config: &QuireConfig,
) -> PipelineResult {
    let mut source_db = SourceDb::new();
    let mut docs = Vec::with_capacity(bodies.len());
    for (i, (variant, text)) in bodies.iter().enumerate() {
        let file = source_db.add_source(format!("Doc{i}.md"), text.to_string());
        docs.push(DocBody {
            file,
            start: 0,
            variant: variant.map(str::to_string),
        });
    }
    let symbol = SymbolInput { metadata, docs };

    let sink = DiagnosticSink::new();
    let output = PossibleValuesPass::new(&config.possible_values)
        .run(&symbol, &source_db, &make_index(), &sink)
        .expect("pass should not return internal error");
    finish_pipeline(output, &sink)
}

fn finish_pipeline(output: SymbolOutput, sink: &DiagnosticSink) -> PipelineResult {
    PipelineResult {
        output,
        diagnostics: sink.take_all(),
        error_count: sink.error_count(),
        warning_count: sink.warning_count(),
    }
}
