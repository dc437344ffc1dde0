//! Analyzer error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during analysis.
///
/// Only configuration-time problems (unsupported language, grammar load
/// failure) abort a run. Malformed source regions are recovered locally and
/// surface as [`crate::model::Diagnostic`]s, never as errors.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// No grammar table exists for the requested language/dialect.
    #[error("Unsupported language: {language}")]
    UnsupportedLanguage {
        language: String,
        hint: Option<String>,
    },

    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("Failed to load grammar for {language}: {message}")]
    Grammar { language: String, message: String },

    /// The parser produced no tree at all for the file.
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// Persistence gateway failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AnalyzerError {
    pub fn unsupported(language: impl Into<String>, hint: Option<&str>) -> Self {
        AnalyzerError::UnsupportedLanguage {
            language: language.into(),
            hint: hint.map(|h| h.to_string()),
        }
    }
}
