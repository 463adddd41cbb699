//! Error types for textkit operations
//!
//! Only configuration problems are errors. Empty input and "nothing found"
//! are ordinary results and never surface here.

use thiserror::Error;

/// Error type for textkit operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value (window size, step, radius, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The same phrase appears twice in a vocabulary
    #[error("Duplicate phrase in vocabulary: {0:?}")]
    DuplicatePhrase(String),

    /// A regular expression failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A TOML configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for textkit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let error = Error::Configuration("window size must be at least 3".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: window size must be at least 3"
        );
    }

    #[test]
    fn test_duplicate_phrase_display() {
        let error = Error::DuplicatePhrase("doctor".to_string());
        assert_eq!(error.to_string(), "Duplicate phrase in vocabulary: \"doctor\"");
    }

    #[test]
    fn test_pattern_error_conversion() {
        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let error: Error = regex_error.into();
        assert!(matches!(error, Error::Pattern(_)));
        assert!(error.to_string().starts_with("Invalid pattern:"));
    }

    #[test]
    fn test_config_parse_error_conversion() {
        let toml_error = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let error: Error = toml_error.into();
        assert!(matches!(error, Error::ConfigParse(_)));
    }
}
