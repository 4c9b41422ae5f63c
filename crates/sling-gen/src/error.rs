//! Error types for module source transformation

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while transforming a module's source
#[derive(Error, Debug, Diagnostic)]
pub enum GenError {
    /// The source text is not syntactically valid
    #[error("Parse failed: {}", diagnostics.join("; "))]
    #[diagnostic(
        code(sling::gen::parse_failed),
        help("If this file is not JavaScript, add a moduleRules entry whose loaders turn it into JavaScript")
    )]
    ParseFailed { diagnostics: Vec<String> },
}

impl GenError {
    /// Create a ParseFailed error from rendered parser diagnostics
    pub fn parse_failed(diagnostics: Vec<String>) -> Self {
        Self::ParseFailed { diagnostics }
    }

    /// Rendered parser diagnostics, in the order the parser reported them
    pub fn diagnostics(&self) -> &[String] {
        match self {
            Self::ParseFailed { diagnostics } => diagnostics,
        }
    }
}

/// Result type for transformation operations
pub type Result<T> = std::result::Result<T, GenError>;
