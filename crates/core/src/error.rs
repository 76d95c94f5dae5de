use thiserror::Error;

/// Result type for sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Errors that can occur while scanning or cleaning source text
#[derive(Error, Debug)]
pub enum SweepError {
    /// The structural scanner could not build an error-free syntax tree
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// A dialect hint that names no known language
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

impl SweepError {
    /// Create a parse failure
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseFailure(msg.into())
    }

    /// Create an unsupported dialect error
    pub fn unsupported_dialect(hint: impl Into<String>) -> Self {
        Self::UnsupportedDialect(hint.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitter(msg.into())
    }

    /// Whether this error should send the caller to the lexical scanner
    #[must_use]
    pub const fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseFailure(_))
    }
}
