use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source dialect a buffer is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Python,
    Java,
    Kotlin,
    Groovy,
    Scala,
    Unknown,
}

/// Tree-sitter grammar used by the structural scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// JavaScript with JSX
    JavaScript,
    TypeScript,
    /// TypeScript with JSX; accepts nearly every construct of the others
    Tsx,
}

impl Grammar {
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Grammar::JavaScript => "javascript",
            Grammar::TypeScript => "typescript",
            Grammar::Tsx => "tsx",
        }
    }
}

impl Dialect {
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] = &[
        "js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx", "py", "pyw", "java", "kt", "kts",
        "groovy", "gvy", "scala", "sc",
    ];

    /// Detect dialect from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Dialect::JavaScript,
            "jsx" => Dialect::Jsx,
            "ts" | "mts" | "cts" => Dialect::TypeScript,
            "tsx" => Dialect::Tsx,
            "py" | "pyw" => Dialect::Python,
            "java" => Dialect::Java,
            "kt" | "kts" => Dialect::Kotlin,
            "groovy" | "gvy" => Dialect::Groovy,
            "scala" | "sc" => Dialect::Scala,
            _ => Dialect::Unknown,
        }
    }

    /// Detect dialect from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Dialect::Unknown)
    }

    /// Resolve an editor language id (`typescriptreact`), a dialect name or
    /// a bare extension. Unrecognized hints resolve to `Unknown`.
    pub fn from_hint(hint: &str) -> Self {
        Self::parse_hint(hint).unwrap_or(Dialect::Unknown)
    }

    /// Strict variant of [`Dialect::from_hint`]
    pub fn parse_hint(hint: &str) -> Result<Self> {
        let normalized = hint.trim().trim_start_matches('.').to_lowercase();
        let dialect = match normalized.as_str() {
            "javascript" | "ecmascript" | "node" => Dialect::JavaScript,
            "javascriptreact" => Dialect::Jsx,
            "typescript" => Dialect::TypeScript,
            "typescriptreact" => Dialect::Tsx,
            "python" => Dialect::Python,
            "kotlin" => Dialect::Kotlin,
            "unknown" | "plaintext" => Dialect::Unknown,
            other => match Self::from_extension(other) {
                Dialect::Unknown => return Err(SweepError::unsupported_dialect(hint.trim())),
                dialect => dialect,
            },
        };
        Ok(dialect)
    }

    /// Get dialect name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::JavaScript => "javascript",
            Dialect::Jsx => "jsx",
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
            Dialect::Python => "python",
            Dialect::Java => "java",
            Dialect::Kotlin => "kotlin",
            Dialect::Groovy => "groovy",
            Dialect::Scala => "scala",
            Dialect::Unknown => "unknown",
        }
    }

    /// Check if this dialect has a structural grammar
    pub fn supports_structural(self) -> bool {
        !self.grammars().is_empty()
    }

    /// Grammars to try, most specific first
    pub fn grammars(self) -> &'static [Grammar] {
        match self {
            Dialect::JavaScript | Dialect::Jsx => &[Grammar::JavaScript, Grammar::Tsx],
            Dialect::TypeScript => &[Grammar::TypeScript, Grammar::Tsx],
            Dialect::Tsx => &[Grammar::Tsx],
            _ => &[],
        }
    }

    pub fn is_supported_path(path: impl AsRef<Path>) -> bool {
        Self::from_path(path) != Dialect::Unknown
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
