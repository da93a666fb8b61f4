//! The error type for inconsistent inputs to the possible-values pass.

/// Result of an operation that fails only on a bug or inconsistent input.
///
/// Problems in authored documentation are never an `Err`: they are reported
/// through the diagnostic sink and the pass still returns `Ok`.
pub type QuireResult<T> = Result<T, InternalError>;

/// Inputs that cannot have come from a well-formed build, such as a body
/// that starts past the end of its file.
#[derive(Debug, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// What was inconsistent.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("variant lists differ in length");
        assert_eq!(
            err.to_string(),
            "internal compiler error: variant lists differ in length"
        );
    }

    #[test]
    fn boxes_into_cli_errors() {
        let boxed: Box<dyn std::error::Error> = InternalError::new("body outside file").into();
        assert!(boxed.to_string().ends_with("body outside file"));
    }
}
