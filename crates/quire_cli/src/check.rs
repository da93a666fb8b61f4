//! `quire check`: reconciles every documented symbol and reports diagnostics.
//!
//! The full pipeline:
//!
//! 1. Find project root (walk up looking for `quire.toml`)
//! 2. Load config via `quire_config`
//! 3. Load the symbol graph and bind documentation files to symbols
//! 4. Run the possible-values pass over the whole catalog
//! 5. Apply the allow/deny policy
//! 6. Render diagnostics

use quire_config::DiagnosticsConfig;
use quire_diagnostics::{DiagnosticSink, JsonRenderer};
use quire_values::PossibleValuesPass;

use crate::pipeline::{
    build_catalog, load_project, parse_rule, render_diagnostics, DiagnosticPolicy,
};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `quire check` command.
///
/// Returns exit code 0 if no diagnostic is an error, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (root, config) = load_project(global)?;

    if !global.quiet {
        eprintln!("   Checking {}", config.project.name);
    }

    let policy = merge_policy(&config.diagnostics, args)?;
    let catalog = build_catalog(&root, &config)?;

    let pass = PossibleValuesPass::new(&config.possible_values);
    let sink = DiagnosticSink::new();
    let outputs = pass.run_catalog(&catalog.symbols, &catalog.source_db, &catalog.index, &sink)?;
    let documented = catalog.symbols.iter().filter(|s| !s.docs.is_empty()).count();
    tracing::debug!(symbols = outputs.len(), documented, "catalog reconciled");
    if global.verbose && !global.quiet {
        eprintln!(
            "   Reconciled {} symbol(s), {} with documentation",
            outputs.len(),
            documented
        );
    }

    let report = DiagnosticSink::new();
    report.emit_all(policy.apply(sink.take_all()));
    let diagnostics = report.take_all();

    match args.format {
        ReportFormat::Text => render_diagnostics(&diagnostics, &catalog.source_db, global.color),
        ReportFormat::Json => {
            println!(
                "{}",
                JsonRenderer::new(true).render_all(&diagnostics, &catalog.source_db)
            );
        }
    }

    let error_count = report.error_count();
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Result: {} symbol(s), {} error(s), {} warning(s)",
            outputs.len(),
            error_count,
            report.warning_count()
        );
    }

    if error_count > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Merges CLI `--allow`/`--deny` flags with the config file's diagnostics section.
///
/// CLI flags take precedence: a rule in CLI `--allow` and config `deny` is
/// allowed. Within the CLI, `--allow` is applied last.
fn merge_policy(
    config: &DiagnosticsConfig,
    args: &CheckArgs,
) -> Result<DiagnosticPolicy, Box<dyn std::error::Error>> {
    let mut policy = DiagnosticPolicy::from_config(config)?;
    for rule in &args.deny {
        policy.deny(parse_rule(rule)?);
    }
    for rule in &args.allow {
        policy.allow(parse_rule(rule)?);
    }
    Ok(policy)
}
