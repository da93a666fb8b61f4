//! The possible-values pass over one symbol or a whole catalog.
//!
//! Each documentation body is parsed, reconciled, diagnosed, and merged on
//! its own; the per-body results are then folded into one [`VariantMap`](crate::VariantMap) per
//! declared value. Catalogs are processed in parallel with one private sink
//! per symbol, and diagnostics are forwarded in catalog order so output is
//! identical from run to run.

use crate::canonical::{extract_canonical, CanonicalEntry};
use crate::directive::parse_possible_values;
use crate::emit::emit_unknown_values;
use crate::merge::merge_content;
use crate::reconcile::{reconcile, ReconciledEntry};
use crate::render::{route, RenderMode, RenderPlan};
use crate::resolve::LinkResolver;
use crate::suggest::SuggestionEngine;
use crate::symbol::{SymbolAttributes, SymbolMetadata};
use crate::variant::VariantTag;
use quire_common::{ContentHash, InternalError, QuireResult};
use quire_config::PossibleValuesConfig;
use quire_diagnostics::DiagnosticSink;
use quire_source::{FileId, SourceDb};
use rayon::prelude::*;
use serde::Serialize;

/// A documentation body for a symbol, held in a [`SourceDb`] file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocBody {
    /// The file holding the body.
    pub file: FileId,
    /// Byte offset where the body starts within the file.
    pub start: u32,
    /// The variant this body documents; `None` for the primary.
    pub variant: Option<VariantTag>,
}

impl DocBody {
    /// A primary body spanning the rest of `file` from `start`.
    pub fn primary(file: FileId, start: u32) -> Self {
        Self {
            file,
            start,
            variant: None,
        }
    }

    /// A body for the variant `tag`.
    pub fn variant(file: FileId, start: u32, tag: impl Into<VariantTag>) -> Self {
        Self {
            file,
            start,
            variant: Some(tag.into()),
        }
    }
}

/// One symbol and its documentation bodies.
#[derive(Clone, Debug)]
pub struct SymbolInput {
    /// The symbol's metadata.
    pub metadata: SymbolMetadata,
    /// Its documentation bodies, in the order diagnostics should follow.
    pub docs: Vec<DocBody>,
}

/// The reconciled possible values of one symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymbolOutput {
    /// The symbol's path.
    pub path: String,
    /// The symbol's display title.
    pub title: String,
    /// One entry per declared value, in declaration order.
    pub entries: Vec<ReconciledEntry>,
    /// How the values are presented.
    pub mode: RenderMode,
    /// The symbol's other attributes.
    pub attributes: SymbolAttributes,
}

impl SymbolOutput {
    /// Builds the render plan for `variant`, falling back to the primary.
    pub fn plan(&self, variant: Option<&str>) -> RenderPlan {
        route(&self.entries, &self.attributes, variant)
    }

    /// Hashes the serialized output, for comparing runs.
    pub fn fingerprint(&self) -> QuireResult<ContentHash> {
        let bytes = serde_json::to_vec(self).map_err(|err| {
            InternalError::new(format!("cannot serialize output of '{}': {err}", self.path))
        })?;
        Ok(ContentHash::from_bytes(&bytes))
    }
}

/// Runs directive parsing through render routing for symbols.
#[derive(Clone, Debug, Default)]
pub struct PossibleValuesPass {
    engine: SuggestionEngine,
}

impl PossibleValuesPass {
    /// Creates a pass using the configured suggestion settings.
    pub fn new(config: &PossibleValuesConfig) -> Self {
        Self {
            engine: SuggestionEngine::new(config),
        }
    }

    /// Creates a pass with default settings.
    pub fn with_defaults() -> Self {
        Self::new(&PossibleValuesConfig::default())
    }

    /// Reconciles one symbol.
    ///
    /// User-facing problems go to `sink`; an `Err` means the inputs were
    /// inconsistent, e.g. a body that starts outside its file.
    #[tracing::instrument(level = "debug", skip_all, fields(symbol = %symbol.metadata.path))]
    pub fn run(
        &self,
        symbol: &SymbolInput,
        source_db: &SourceDb,
        resolver: &dyn LinkResolver,
        sink: &DiagnosticSink,
    ) -> QuireResult<SymbolOutput> {
        let metadata = &symbol.metadata;
        let canonical = extract_canonical(metadata);

        let mut bodies = Vec::with_capacity(symbol.docs.len());
        for body in &symbol.docs {
            let entries = self.run_body(body, metadata, &canonical, source_db, resolver, sink)?;
            bodies.push((body.variant.clone(), entries));
        }

        let entries = match combine_variants(bodies)? {
            Some(entries) => entries,
            None => reconcile(&[], &canonical).entries,
        };
        let mode = RenderMode::for_entries(&entries);
        tracing::debug!(declared = canonical.len(), ?mode, "reconciled");

        Ok(SymbolOutput {
            path: metadata.path.clone(),
            title: metadata.display_title().to_string(),
            entries,
            mode,
            attributes: metadata.attributes.clone(),
        })
    }

    fn run_body(
        &self,
        body: &DocBody,
        metadata: &SymbolMetadata,
        canonical: &[CanonicalEntry],
        source_db: &SourceDb,
        resolver: &dyn LinkResolver,
        sink: &DiagnosticSink,
    ) -> QuireResult<Vec<ReconciledEntry>> {
        let file = source_db.try_get_file(body.file).ok_or_else(|| {
            InternalError::new(format!("no source file {:?} for '{}'", body.file, metadata.path))
        })?;
        let text = file.body(body.start).ok_or_else(|| {
            InternalError::new(format!(
                "body of '{}' starts at {} outside {}",
                metadata.path,
                body.start,
                file.path.display()
            ))
        })?;

        let documented = parse_possible_values(body.file, text, body.start);
        let result = reconcile(&documented, canonical);
        tracing::debug!(
            variant = body.variant.as_deref().unwrap_or("primary"),
            documented = documented.len(),
            matched = result.matched.len(),
            extras = result.extras.len(),
            implicit = result.implicit.len(),
            "partitioned"
        );

        emit_unknown_values(
            &result.extras,
            canonical,
            metadata.display_title(),
            &self.engine,
            sink,
        );
        let mut entries = result.entries;
        merge_content(&mut entries, &metadata.path, resolver, sink);
        Ok(entries)
    }

    /// Reconciles every symbol of a catalog in parallel.
    ///
    /// Outputs and diagnostics come back in catalog order. Every symbol's
    /// diagnostics are forwarded before the first internal error, if any, is
    /// returned.
    #[tracing::instrument(level = "debug", skip_all, fields(symbols = symbols.len()))]
    pub fn run_catalog(
        &self,
        symbols: &[SymbolInput],
        source_db: &SourceDb,
        resolver: &dyn LinkResolver,
        sink: &DiagnosticSink,
    ) -> QuireResult<Vec<SymbolOutput>> {
        let results: Vec<_> = symbols
            .par_iter()
            .map(|symbol| {
                let local = DiagnosticSink::new();
                let output = self.run(symbol, source_db, resolver, &local);
                (output, local.take_all())
            })
            .collect();

        let mut outputs = Vec::with_capacity(results.len());
        let mut first_error = None;
        for (output, diagnostics) in results {
            sink.emit_all(diagnostics);
            match output {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    tracing::error!(%err, "symbol failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(outputs),
        }
    }
}

/// Folds per-body entry lists into one list with per-variant content.
///
/// The untagged body is the primary; without one, the first body is. A
/// variant only overrides entries it actually documents.
fn combine_variants(
    bodies: Vec<(Option<VariantTag>, Vec<ReconciledEntry>)>,
) -> QuireResult<Option<Vec<ReconciledEntry>>> {
    if bodies.is_empty() {
        return Ok(None);
    }
    let primary_index = bodies
        .iter()
        .position(|(tag, _)| tag.is_none())
        .unwrap_or(0);

    let expected = bodies[primary_index].1.len();
    if let Some((tag, entries)) = bodies.iter().find(|(_, e)| e.len() != expected) {
        return Err(InternalError::new(format!(
            "variant {tag:?} reconciled {} entries, expected {expected}",
            entries.len()
        )));
    }

    let mut combined = Vec::new();
    let mut tagged = Vec::new();
    for (index, (tag, entries)) in bodies.into_iter().enumerate() {
        if index == primary_index {
            if let Some(tag) = tag {
                tagged.push((tag, entries.clone()));
            }
            combined = entries;
        } else if let Some(tag) = tag {
            tagged.push((tag, entries));
        }
    }

    for (tag, entries) in tagged {
        for (target, entry) in combined.iter_mut().zip(entries) {
            let content = entry.content.into_primary();
            if !content.is_empty() {
                target.content.insert(tag.clone(), content);
            }
        }
    }
    Ok(Some(combined))
}
