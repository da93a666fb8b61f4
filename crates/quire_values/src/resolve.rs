//! The link-resolution contract and a path-based reference index.

use quire_common::{Ident, Interner};
use std::collections::HashSet;

/// Prefix that marks an article reference.
pub const ARTICLE_PREFIX: &str = "doc:";

/// A reference that resolved to a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The page identifier: a symbol path or `doc:Name`.
    pub destination: String,
    /// The text shown for the link.
    pub title: String,
}

/// The outcome of resolving one reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The reference names a known page.
    Resolved(ResolvedLink),
    /// The reference names nothing; `reason` explains why.
    Unresolved(String),
}

/// Resolves references written in authored content.
///
/// Shared across worker threads when a catalog is processed in parallel.
pub trait LinkResolver: Send + Sync {
    /// Resolves `reference` as written inside the page at `context_path`.
    fn resolve(&self, reference: &str, context_path: &str) -> Resolution;
}

/// An index of known symbol paths and article names.
///
/// Symbol references are tried relative to each ancestor of the context
/// path, innermost first, and then as an absolute path.
#[derive(Default)]
pub struct ReferenceIndex {
    interner: Interner,
    symbols: HashSet<Ident>,
    articles: HashSet<Ident>,
}

impl ReferenceIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a symbol by its full path, e.g. `MyKit/Month`.
    pub fn add_symbol(&mut self, path: &str) {
        let ident = self.interner.get_or_intern(path.trim_matches('/'));
        self.symbols.insert(ident);
    }

    /// Registers an article by name.
    pub fn add_article(&mut self, name: &str) {
        let ident = self.interner.get_or_intern(name);
        self.articles.insert(ident);
    }

    /// Returns the number of registered symbols and articles.
    pub fn len(&self) -> usize {
        self.symbols.len() + self.articles.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_symbol(&self, path: &str) -> bool {
        self.interner
            .get(path)
            .is_some_and(|ident| self.symbols.contains(&ident))
    }

    fn has_article(&self, name: &str) -> bool {
        self.interner
            .get(name)
            .is_some_and(|ident| self.articles.contains(&ident))
    }

    fn resolve_symbol(&self, reference: &str, context_path: &str) -> Option<String> {
        let reference = reference.trim_matches('/');
        let mut scope = context_path.trim_matches('/');
        loop {
            if !scope.is_empty() {
                let candidate = format!("{scope}/{reference}");
                if self.has_symbol(&candidate) {
                    return Some(candidate);
                }
            }
            match scope.rfind('/') {
                Some(index) => scope = &scope[..index],
                None if !scope.is_empty() => scope = "",
                None => break,
            }
        }
        self.has_symbol(reference).then(|| reference.to_string())
    }
}

impl LinkResolver for ReferenceIndex {
    fn resolve(&self, reference: &str, context_path: &str) -> Resolution {
        if let Some(article) = reference.strip_prefix(ARTICLE_PREFIX) {
            // Articles may be written with a module prefix: `<doc:MyKit/Calendars>`.
            let name = article.rsplit('/').next().unwrap_or(article);
            if self.has_article(name) {
                return Resolution::Resolved(ResolvedLink {
                    destination: format!("{ARTICLE_PREFIX}{name}"),
                    title: name.to_string(),
                });
            }
            return Resolution::Unresolved(format!("no article named '{name}'"));
        }

        match self.resolve_symbol(reference, context_path) {
            Some(path) => {
                let title = path.rsplit('/').next().unwrap_or(&path).to_string();
                Resolution::Resolved(ResolvedLink {
                    destination: path,
                    title,
                })
            }
            None => Resolution::Unresolved(format!(
                "no symbol named '{reference}' is reachable from '{context_path}'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ReferenceIndex {
        let mut index = ReferenceIndex::new();
        index.add_symbol("MyKit");
        index.add_symbol("MyKit/Month");
        index.add_symbol("MyKit/Month/january");
        index.add_symbol("MyKit/Weekday");
        index.add_article("Calendars");
        index
    }

    fn destination(resolution: Resolution) -> Option<String> {
        match resolution {
            Resolution::Resolved(link) => Some(link.destination),
            Resolution::Unresolved(_) => None,
        }
    }

    #[test]
    fn innermost_scope_first() {
        let index = index();
        assert_eq!(
            destination(index.resolve("january", "MyKit/Month")),
            Some("MyKit/Month/january".to_string())
        );
        assert_eq!(
            destination(index.resolve("Weekday", "MyKit/Month")),
            Some("MyKit/Weekday".to_string())
        );
    }

    #[test]
    fn absolute_paths() {
        let index = index();
        assert_eq!(
            destination(index.resolve("MyKit/Weekday", "MyKit/Month")),
            Some("MyKit/Weekday".to_string())
        );
        assert_eq!(
            destination(index.resolve("/MyKit/Month", "Other")),
            Some("MyKit/Month".to_string())
        );
    }

    #[test]
    fn titles_use_last_component() {
        let Resolution::Resolved(link) = index().resolve("Month/january", "MyKit") else {
            panic!("expected a link");
        };
        assert_eq!(link.title, "january");
    }

    #[test]
    fn articles() {
        let index = index();
        assert_eq!(
            destination(index.resolve("doc:Calendars", "MyKit/Month")),
            Some("doc:Calendars".to_string())
        );
        assert_eq!(
            destination(index.resolve("doc:MyKit/Calendars", "MyKit/Month")),
            Some("doc:Calendars".to_string())
        );
        assert!(matches!(
            index.resolve("doc:Missing", "MyKit"),
            Resolution::Unresolved(reason) if reason.contains("Missing")
        ));
    }

    #[test]
    fn unknown_symbol_is_unresolved() {
        let index = index();
        assert!(matches!(
            index.resolve("Mont", "MyKit/Month"),
            Resolution::Unresolved(_)
        ));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn lookup_does_not_grow_the_interner() {
        let index = index();
        let before = index.interner.len();
        let _ = index.resolve("Nope", "MyKit/Month");
        assert_eq!(index.interner.len(), before);
    }
}
