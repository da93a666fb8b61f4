//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            _ => None,
        }
    }
}

/// A structured diagnostic code combining a category prefix and a number.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number, e.g. `W301`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

impl FromStr for DiagnosticCode {
    type Err = String;

    /// Parses the displayed form (`W301`) back into a code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let category = chars
            .next()
            .and_then(Category::from_prefix)
            .ok_or_else(|| format!("invalid diagnostic code '{s}'"))?;
        let number = chars
            .as_str()
            .parse::<u16>()
            .map_err(|_| format!("invalid diagnostic code '{s}'"))?;
        Ok(Self { category, number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        assert_eq!(
            format!("{}", DiagnosticCode::new(Category::Warning, 301)),
            "W301"
        );
        assert_eq!(
            format!("{}", DiagnosticCode::new(Category::Error, 3)),
            "E003"
        );
    }

    #[test]
    fn parse_displayed_form() {
        let code: DiagnosticCode = "W302".parse().unwrap();
        assert_eq!(code, DiagnosticCode::new(Category::Warning, 302));
        assert!("X100".parse::<DiagnosticCode>().is_err());
        assert!("W".parse::<DiagnosticCode>().is_err());
        assert!("unknown-possible-value".parse::<DiagnosticCode>().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Warning, 301);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
