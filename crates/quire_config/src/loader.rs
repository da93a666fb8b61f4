//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::QuireConfig;
use std::path::Path;

/// The name of the configuration file at a project root.
pub const CONFIG_FILE_NAME: &str = "quire.toml";

/// Loads and validates `quire.toml` from a project directory.
pub fn load_config(project_dir: &Path) -> Result<QuireConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::IoError { path, source })?;
    load_config_from_str(&content)
}

/// Parses and validates a `quire.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<QuireConfig, ConfigError> {
    let config: QuireConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and overrides don't conflict.
fn validate_config(config: &QuireConfig) -> Result<(), ConfigError> {
    if config.project.name.trim().is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.project.symbols.trim().is_empty() {
        return Err(ConfigError::MissingField("project.symbols".to_string()));
    }
    if config.project.docs.trim().is_empty() {
        return Err(ConfigError::MissingField("project.docs".to_string()));
    }
    if let Some(rule) = config
        .diagnostics
        .deny
        .iter()
        .find(|rule| config.diagnostics.allow.contains(rule))
    {
        return Err(ConfigError::ValidationError(format!(
            "'{rule}' is both denied and allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TieBreak;

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
[project]
name = "MyKit"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.name, "MyKit");
        assert_eq!(config.project.symbols, "symbols.json");
        assert_eq!(config.project.docs, "Docs");
        assert_eq!(config.possible_values.max_edit_distance, 3);
        assert!(config.diagnostics.deny.is_empty());
        assert!(config.diagnostics.allow.is_empty());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[project]
name = "MyKit"
symbols = "build/MyKit.symbols.json"
docs = "Sources/MyKit/MyKit.docc"

[possible_values]
max_edit_distance = 2
tie_break = "first_declared"

[diagnostics]
deny = ["W301"]
allow = ["unresolved-reference"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.project.symbols, "build/MyKit.symbols.json");
        assert_eq!(config.project.docs, "Sources/MyKit/MyKit.docc");
        assert_eq!(config.possible_values.max_edit_distance, 2);
        assert_eq!(config.possible_values.tie_break, TieBreak::FirstDeclared);
        assert_eq!(config.diagnostics.deny, vec!["W301"]);
        assert_eq!(config.diagnostics.allow, vec!["unresolved-reference"]);
    }

    #[test]
    fn missing_name_errors() {
        let toml = r#"
[project]
name = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.name"));
    }

    #[test]
    fn empty_docs_errors() {
        let toml = r#"
[project]
name = "MyKit"
docs = " "
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.docs"));
    }

    #[test]
    fn conflicting_overrides_error() {
        let toml = r#"
[project]
name = "MyKit"

[diagnostics]
deny = ["W301"]
allow = ["W301"]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_project_section_errors() {
        let err = load_config_from_str("[possible_values]\nmax_edit_distance = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn io_error_from_nonexistent_dir() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
