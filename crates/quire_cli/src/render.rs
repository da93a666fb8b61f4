//! `quire render`: prints one symbol's render plan as JSON.

use std::path::Path;

use quire_config::QuireConfig;
use quire_diagnostics::{Diagnostic, DiagnosticSink};
use quire_source::SourceDb;
use quire_values::{PossibleValuesPass, RenderPlan};
use serde::Serialize;

use crate::pipeline::{build_catalog, load_project, render_diagnostics, DiagnosticPolicy};
use crate::{GlobalArgs, RenderArgs};

/// A symbol's page plan as printed by `quire render`.
#[derive(Debug, Serialize)]
pub struct RenderedSymbol {
    /// The symbol's full path.
    pub path: String,
    /// The symbol's display title.
    pub title: String,
    /// The variant that was rendered, if one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Fingerprint of the symbol's reconciled output.
    pub fingerprint: String,
    /// The chosen mode and sections.
    #[serde(flatten)]
    pub plan: RenderPlan,
}

/// The plan plus the diagnostics found while building it.
struct Rendered {
    symbol: RenderedSymbol,
    diagnostics: Vec<Diagnostic>,
    source_db: SourceDb,
}

/// Runs the `quire render` command.
///
/// Diagnostics for the symbol go to stderr; the plan goes to stdout.
pub fn run(args: &RenderArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (root, config) = load_project(global)?;
    let rendered = render_symbol(&root, &config, &args.symbol, args.variant.as_deref())?;

    if !global.quiet {
        render_diagnostics(&rendered.diagnostics, &rendered.source_db, global.color);
    }
    println!("{}", serde_json::to_string_pretty(&rendered.symbol)?);
    Ok(0)
}

/// Runs the pass for one symbol and builds its plan for `variant`.
fn render_symbol(
    root: &Path,
    config: &QuireConfig,
    symbol: &str,
    variant: Option<&str>,
) -> Result<Rendered, Box<dyn std::error::Error>> {
    let catalog = build_catalog(root, config)?;
    let input = catalog.find(symbol).ok_or_else(|| {
        format!(
            "no symbol named '{symbol}' in {}",
            root.join(&config.project.symbols).display()
        )
    })?;

    if let Some(tag) = variant {
        if !input.docs.iter().any(|body| body.variant.as_deref() == Some(tag)) {
            tracing::warn!(
                symbol = %input.metadata.path,
                variant = tag,
                "no documentation for variant; using the primary"
            );
        }
    }

    let sink = DiagnosticSink::new();
    let pass = PossibleValuesPass::new(&config.possible_values);
    let output = pass.run(input, &catalog.source_db, &catalog.index, &sink)?;
    let policy = DiagnosticPolicy::from_config(&config.diagnostics)?;
    let fingerprint = output.fingerprint()?.to_string();

    Ok(Rendered {
        symbol: RenderedSymbol {
            plan: output.plan(variant),
            fingerprint,
            path: output.path,
            title: output.title,
            variant: variant.map(str::to_string),
        },
        diagnostics: policy.apply(sink.take_all()),
        source_db: catalog.source_db,
    })
}
