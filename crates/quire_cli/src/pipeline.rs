//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps `check` and `render` have in common: project root and
//! config resolution, symbol graph loading, documentation discovery, catalog
//! assembly, and the allow/deny diagnostic policy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quire_config::{
    load_config, load_config_from_str, DiagnosticsConfig, QuireConfig, CONFIG_FILE_NAME,
};
use quire_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticRenderer, Severity, TerminalRenderer,
};
use quire_source::SourceDb;
use quire_values::errors::lookup_rule;
use quire_values::{DocBody, ReferenceIndex, SymbolInput, SymbolMetadata, VariantTag};
use serde::Deserialize;

use crate::GlobalArgs;

/// Marker line that tags a documentation file with a variant.
const VARIANT_MARKER: &str = "@Variant(";

/// Walks up from `start` looking for the nearest directory containing `quire.toml`.
///
/// Returns the directory containing `quire.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root and loads its configuration.
///
/// If `--config` names a file, that file is loaded and its directory is the
/// root; if it names a directory, that directory's `quire.toml` is loaded.
/// Otherwise walks up from the current directory.
pub fn load_project(
    global: &GlobalArgs,
) -> Result<(PathBuf, QuireConfig), Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config_path) => {
            let path = PathBuf::from(config_path);
            if path.is_file() {
                let content = std::fs::read_to_string(&path)?;
                let config = load_config_from_str(&content)?;
                let root = path
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok((root, config))
            } else {
                let config = load_config(&path)?;
                Ok((path, config))
            }
        }
        None => {
            let root = find_project_root(&std::env::current_dir()?)?;
            let config = load_config(&root)?;
            Ok((root, config))
        }
    }
}

/// The symbol metadata file: a module and its documented symbols.
#[derive(Clone, Debug, Deserialize)]
pub struct SymbolGraph {
    /// The module name; symbol paths start with it.
    pub module: String,
    /// Every symbol, in the order the catalog is processed.
    #[serde(default)]
    pub symbols: Vec<SymbolMetadata>,
}

impl SymbolGraph {
    /// Parses a symbol graph from JSON.
    pub fn from_json(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads the symbol graph at `path`.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {e}", path.display()))?;
        Self::from_json(&content).map_err(|e| format!("{}: {e}", path.display()).into())
    }

    /// Finds a symbol by its full path or by a path relative to the module.
    pub fn find(&self, path: &str) -> Option<&SymbolMetadata> {
        let path = path.trim_matches('/');
        let qualified = format!("{}/{path}", self.module);
        self.symbols
            .iter()
            .find(|symbol| symbol.path == path)
            .or_else(|| self.symbols.iter().find(|symbol| symbol.path == qualified))
    }
}

/// The header of a documentation extension file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocHeader {
    /// The symbol path written in the heading.
    pub symbol: String,
    /// The variant named by an `@Variant(tag)` line, if any.
    pub variant: Option<VariantTag>,
    /// Byte offset where the body begins.
    pub body_start: u32,
}

/// Reads a `# ``Path`` ` heading and an optional `@Variant(tag)` line.
///
/// Returns `None` when the first non-blank line isn't a symbol heading; such
/// files are articles.
pub fn parse_doc_header(content: &str) -> Option<DocHeader> {
    let mut lines = line_offsets(content).filter(|(_, line)| !line.trim().is_empty());

    let (heading_start, heading) = lines.next()?;
    let symbol = heading
        .trim()
        .strip_prefix('#')?
        .trim()
        .strip_prefix("``")?
        .strip_suffix("``")?
        .trim();
    if symbol.is_empty() || symbol.contains('`') {
        return None;
    }
    let mut body_start = heading_start + heading.len();

    let mut variant = None;
    if let Some((start, line)) = lines.next() {
        let tag = line
            .trim()
            .strip_prefix(VARIANT_MARKER)
            .and_then(|rest| rest.strip_suffix(')'))
            .map(str::trim);
        if let Some(tag) = tag.filter(|tag| !tag.is_empty()) {
            variant = Some(tag.to_string());
            body_start = start + line.len();
        }
    }

    Some(DocHeader {
        symbol: symbol.to_string(),
        variant,
        body_start: u32::try_from(body_start).ok()?,
    })
}

/// Yields each line with its start offset; lines keep their terminator.
fn line_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Discovers Markdown files in the given directory (recursive), sorted by path.
pub fn discover_doc_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    walk_dir(dir, &mut files)?;
    files.sort();
    Ok(files)
}

/// Recursively walks a directory collecting `.md` files.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

/// Everything a pass over the project needs.
pub struct Catalog {
    /// The symbol graph's module name.
    pub module: String,
    /// Every loaded documentation file.
    pub source_db: SourceDb,
    /// Symbols with their documentation bodies, in symbol graph order.
    pub symbols: Vec<SymbolInput>,
    /// Known symbols and articles.
    pub index: ReferenceIndex,
}

impl Catalog {
    /// Finds a symbol by its full path or by a path relative to the module.
    pub fn find(&self, path: &str) -> Option<&SymbolInput> {
        let path = path.trim_matches('/');
        let qualified = format!("{}/{path}", self.module);
        self.symbols
            .iter()
            .find(|symbol| symbol.metadata.path == path)
            .or_else(|| {
                self.symbols
                    .iter()
                    .find(|symbol| symbol.metadata.path == qualified)
            })
    }
}

/// Loads the symbol graph and documentation and binds bodies to symbols.
///
/// Files with a symbol heading become that symbol's bodies; every other
/// `.md` file is registered as an article under its file stem. Headings that
/// name no known symbol, and second bodies for the same variant, are skipped
/// with a warning.
pub fn build_catalog(
    root: &Path,
    config: &QuireConfig,
) -> Result<Catalog, Box<dyn std::error::Error>> {
    let graph = SymbolGraph::load(&root.join(&config.project.symbols))?;
    if graph.module != config.project.name {
        tracing::warn!(
            module = %graph.module,
            project = %config.project.name,
            "symbol graph module differs from project name"
        );
    }

    let mut index = ReferenceIndex::new();
    index.add_symbol(&graph.module);
    for symbol in &graph.symbols {
        index.add_symbol(&symbol.path);
    }

    let docs_dir = root.join(&config.project.docs);
    let doc_files = if docs_dir.is_dir() {
        discover_doc_files(&docs_dir)?
    } else {
        tracing::debug!(dir = %docs_dir.display(), "no documentation directory");
        Vec::new()
    };

    let mut source_db = SourceDb::new();
    let mut bodies: HashMap<String, Vec<DocBody>> = HashMap::new();
    for path in &doc_files {
        let file = source_db.load_file(path)?;
        let Some(header) = parse_doc_header(&source_db.get_file(file).content) else {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                index.add_article(stem);
            }
            continue;
        };

        let Some(symbol) = graph.find(&header.symbol) else {
            tracing::warn!(
                file = %path.display(),
                symbol = %header.symbol,
                "documentation extension for an unknown symbol"
            );
            continue;
        };

        let docs = bodies.entry(symbol.path.clone()).or_default();
        if docs.iter().any(|body| body.variant == header.variant) {
            tracing::warn!(
                file = %path.display(),
                symbol = %symbol.path,
                variant = header.variant.as_deref().unwrap_or("primary"),
                "duplicate documentation body skipped"
            );
            continue;
        }
        docs.push(DocBody {
            file,
            start: header.body_start,
            variant: header.variant,
        });
    }

    let symbols = graph
        .symbols
        .into_iter()
        .map(|metadata| {
            let docs = bodies.remove(&metadata.path).unwrap_or_default();
            SymbolInput { metadata, docs }
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        symbols = symbols.len(),
        files = doc_files.len(),
        "catalog built"
    );

    Ok(Catalog {
        module: graph.module,
        source_db,
        symbols,
        index,
    })
}

/// Which diagnostics are suppressed and which are promoted to errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticPolicy {
    deny: Vec<DiagnosticCode>,
    allow: Vec<DiagnosticCode>,
}

impl DiagnosticPolicy {
    /// Builds a policy from the config file's `[diagnostics]` section.
    pub fn from_config(config: &DiagnosticsConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut policy = Self::default();
        for rule in &config.deny {
            policy.deny(parse_rule(rule)?);
        }
        for rule in &config.allow {
            policy.allow(parse_rule(rule)?);
        }
        Ok(policy)
    }

    /// Promotes `code` to an error, overriding an earlier allow.
    pub fn deny(&mut self, code: DiagnosticCode) {
        self.allow.retain(|c| *c != code);
        if !self.deny.contains(&code) {
            self.deny.push(code);
        }
    }

    /// Suppresses `code`, overriding an earlier deny.
    pub fn allow(&mut self, code: DiagnosticCode) {
        self.deny.retain(|c| *c != code);
        if !self.allow.contains(&code) {
            self.allow.push(code);
        }
    }

    /// Drops allowed diagnostics and promotes denied ones.
    pub fn apply(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter(|diag| !self.allow.contains(&diag.code))
            .map(|mut diag| {
                if self.deny.contains(&diag.code) {
                    diag.severity = Severity::Error;
                }
                diag
            })
            .collect()
    }
}

/// Parses a rule given by code (`W301`) or name (`unknown-possible-value`).
pub fn parse_rule(rule: &str) -> Result<DiagnosticCode, Box<dyn std::error::Error>> {
    lookup_rule(rule).ok_or_else(|| format!("unknown diagnostic rule '{rule}'").into())
}

/// Renders diagnostics to stderr using the terminal renderer.
pub fn render_diagnostics(diagnostics: &[Diagnostic], source_db: &SourceDb, color: bool) {
    let renderer = TerminalRenderer::new(color, 80);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag, source_db));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_values::errors::{W301, W302};
    use std::fs;
    use tempfile::TempDir;

    const SYMBOLS: &str = r#"{
  "module": "MyKit",
  "symbols": [
    { "path": "MyKit/Month", "kind": "enum", "values": ["January", "February", "March"] },
    { "path": "MyKit/Weekday", "values": ["Monday"] }
  ]
}"#;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("quire.toml"), "[project]\nname = \"MyKit\"\n").unwrap();
        fs::write(tmp.path().join("symbols.json"), SYMBOLS).unwrap();
        fs::create_dir_all(tmp.path().join("Docs")).unwrap();
        tmp
    }

    fn global(config: Option<&Path>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: config.map(|p| p.display().to_string()),
        }
    }

    #[test]
    fn find_project_root_in_parent() {
        let tmp = project();
        let sub = tmp.path().join("Docs").join("Nested");
        fs::create_dir_all(&sub).unwrap();
        assert_eq!(find_project_root(&sub).unwrap(), tmp.path());
    }

    #[test]
    fn find_project_root_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(find_project_root(tmp.path()).is_err());
    }

    #[test]
    fn load_project_from_file_or_dir() {
        let tmp = project();
        let (root, config) = load_project(&global(Some(&tmp.path().join("quire.toml")))).unwrap();
        assert_eq!(root, tmp.path());
        assert_eq!(config.project.name, "MyKit");

        let (root, _) = load_project(&global(Some(tmp.path()))).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn header_with_variant() {
        let text = "# ``MyKit/Month``\n@Variant(occ)\n\n- PossibleValue March: x\n";
        let header = parse_doc_header(text).unwrap();
        assert_eq!(header.symbol, "MyKit/Month");
        assert_eq!(header.variant.as_deref(), Some("occ"));
        assert_eq!(&text[header.body_start as usize..], "\n- PossibleValue March: x\n");
    }

    #[test]
    fn header_without_variant() {
        let text = "\n# ``Month``\n\nSome overview.\n";
        let header = parse_doc_header(text).unwrap();
        assert_eq!(header.symbol, "Month");
        assert_eq!(header.variant, None);
        assert_eq!(&text[header.body_start as usize..], "\nSome overview.\n");
    }

    #[test]
    fn articles_have_no_symbol_header() {
        assert_eq!(parse_doc_header("# Calendars\n\nText.\n"), None);
        assert_eq!(parse_doc_header("Intro\n# ``Month``\n"), None);
        assert_eq!(parse_doc_header(""), None);
    }

    #[test]
    fn symbol_graph_lookup() {
        let graph = SymbolGraph::from_json(SYMBOLS).unwrap();
        assert_eq!(graph.find("MyKit/Month").unwrap().path, "MyKit/Month");
        assert_eq!(graph.find("Weekday").unwrap().path, "MyKit/Weekday");
        assert!(graph.find("Year").is_none());
        assert!(SymbolGraph::from_json("{").is_err());
    }

    #[test]
    fn catalog_binds_bodies_and_articles() {
        let tmp = project();
        let docs = tmp.path().join("Docs");
        fs::write(docs.join("Month.md"), "# ``Month``\n\n- PossibleValue March: x\n").unwrap();
        fs::write(docs.join("Month-occ.md"), "# ``MyKit/Month``\n@Variant(occ)\n").unwrap();
        fs::write(docs.join("Month-copy.md"), "# ``Month``\n").unwrap();
        fs::write(docs.join("Year.md"), "# ``Year``\n").unwrap();
        fs::write(docs.join("Calendars.md"), "# Calendars\n").unwrap();

        let (root, config) = load_project(&global(Some(tmp.path()))).unwrap();
        let catalog = build_catalog(&root, &config).unwrap();

        assert_eq!(catalog.symbols.len(), 2);
        let month = catalog.find("Month").unwrap();
        assert_eq!(month.docs.len(), 2);
        let tags: Vec<_> = month.docs.iter().map(|d| d.variant.as_deref()).collect();
        assert!(tags.contains(&None));
        assert!(tags.contains(&Some("occ")));
        assert!(catalog.find("MyKit/Weekday").unwrap().docs.is_empty());
        // MyKit, two symbols, one article.
        assert_eq!(catalog.index.len(), 4);
    }

    #[test]
    fn catalog_without_docs_dir() {
        let tmp = project();
        fs::remove_dir(tmp.path().join("Docs")).unwrap();
        let (root, config) = load_project(&global(Some(tmp.path()))).unwrap();
        let catalog = build_catalog(&root, &config).unwrap();
        assert!(catalog.symbols.iter().all(|s| s.docs.is_empty()));
    }

    #[test]
    fn policy_allow_and_deny() {
        let config = DiagnosticsConfig {
            deny: vec!["unknown-possible-value".to_string()],
            allow: vec!["W302".to_string()],
        };
        let policy = DiagnosticPolicy::from_config(&config).unwrap();

        let span = quire_source::Span::DUMMY;
        let diags = policy.apply(vec![
            Diagnostic::warning(W301, "a", span),
            Diagnostic::warning(W302, "b", span),
        ]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, W301);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn later_override_wins() {
        let mut policy = DiagnosticPolicy::default();
        policy.deny(W301);
        policy.allow(W301);
        let diag = Diagnostic::warning(W301, "a", quire_source::Span::DUMMY);
        assert!(policy.apply(vec![diag]).is_empty());
    }

    #[test]
    fn unknown_rule_is_an_error() {
        assert!(parse_rule("W999").is_err());
        assert!(parse_rule("no-such-rule").is_err());
        assert_eq!(parse_rule("unresolved-reference").unwrap(), W302);
    }
}
