//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures that are not I/O or core errors
#[derive(Debug)]
pub enum CliError {
    /// No file matched any of the input patterns
    NoInput(Vec<String>),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    Config(String),
    /// A `--tokens` range that does not parse
    InvalidTokenRange(String),
    /// A command that needs terms got none
    MissingVocabulary,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput(patterns) => {
                write!(f, "No files found matching: {}", patterns.join(", "))
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidTokenRange(range) => write!(
                f,
                "Invalid token range: {range} (expected START-END or START-END:TAG)"
            ),
            CliError::MissingVocabulary => {
                write!(f, "No terms given: use --term or --vocab")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_display() {
        let error = CliError::NoInput(vec!["*.txt".to_string(), "notes/*.md".to_string()]);
        assert_eq!(error.to_string(), "No files found matching: *.txt, notes/*.md");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_display() {
        let error = CliError::Config("window step must be greater than 0".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: window step must be greater than 0"
        );
    }

    #[test]
    fn test_token_range_display() {
        let error = CliError::InvalidTokenRange("3-x".to_string());
        assert!(error.to_string().starts_with("Invalid token range: 3-x"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let result: CliResult<()> = Err(CliError::MissingVocabulary.into());
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("--term"));
    }
}
