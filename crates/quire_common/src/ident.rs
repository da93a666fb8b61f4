//! Interned symbol paths and article names.

use lasso::ThreadedRodeo;

/// An interned page name: a symbol path such as `MyKit/Month` or an article
/// name such as `Calendars`.
///
/// Compares and hashes as a `u32`, so reference lookups never compare strings.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Ident(u32);

// SAFETY: `try_from_usize` rejects indices that don't fit in a `u32`, and
// `into_usize` widens losslessly on every supported platform.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// Interns page names for a reference index.
///
/// Backed by [`lasso::ThreadedRodeo`] so an index built once can be queried
/// from every worker of a parallel catalog run.
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Registers a page name, returning the existing [`Ident`] if it is
    /// already known.
    pub fn get_or_intern(&self, name: &str) -> Ident {
        self.rodeo.get_or_intern(name)
    }

    /// Looks up a name written by an author without registering it, so
    /// misspelled references never grow the table.
    pub fn get(&self, name: &str) -> Option<Ident> {
        self.rodeo.get(name)
    }

    /// Number of distinct names registered.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Returns `true` if no name has been registered.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
