use crate::config::RemovalConfig;
use crate::dialect::Dialect;
use crate::error::{Result, SweepError};
use crate::filter::filter;
use crate::lexical::scan_lexical;
use crate::report::{report, Report};
use crate::scanner;
use crate::surgeon::remove_all;
use crate::types::{CleanResult, ScanMethod, ScanOutcome};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Structural scan, falling back to the lexical scanner on any failure
pub fn find_statements(text: &str, dialect: Dialect) -> ScanOutcome {
    match scanner::scan(text, dialect) {
        Ok(statements) => ScanOutcome {
            statements,
            method: ScanMethod::Structural,
        },
        Err(e) => {
            if dialect.supports_structural() {
                log::warn!("Structural scan failed, falling back to lexical: {e}");
            } else {
                log::debug!("Scanning {dialect} lexically: {e}");
            }
            ScanOutcome {
                statements: scan_lexical(text),
                method: ScanMethod::Lexical {
                    reason: e.to_string(),
                },
            }
        }
    }
}

/// Everything one cleaning run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepOutcome {
    pub dialect: Dialect,

    /// Statements located before filtering
    pub found_count: usize,

    #[serde(flatten)]
    pub method: ScanMethod,

    pub result: CleanResult,

    pub report: Report,
}

impl SweepOutcome {
    pub fn is_changed(&self) -> bool {
        self.result.is_changed()
    }
}

/// Scan, filter and clean buffers with one configuration
#[derive(Debug, Clone)]
pub struct Sweeper {
    config: RemovalConfig,
}

impl Sweeper {
    /// Create a sweeper, rejecting an invalid configuration
    pub fn new(config: RemovalConfig) -> Result<Self> {
        config.validate().map_err(SweepError::invalid_config)?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &RemovalConfig {
        &self.config
    }

    /// Locate statements without filtering or removing anything
    pub fn scan_str(&self, text: &str, dialect: Dialect) -> ScanOutcome {
        find_statements(text, dialect)
    }

    /// Clean a buffer, inferring the dialect from `file_path`
    pub fn clean_str(&self, text: &str, file_path: Option<&str>) -> SweepOutcome {
        let dialect = file_path.map_or(Dialect::Unknown, Dialect::from_path);
        self.clean_with_dialect(text, dialect)
    }

    /// Clean a file on disk; the file itself is not written
    pub fn clean_file(&self, path: impl AsRef<Path>) -> Result<SweepOutcome> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(self.clean_with_dialect(&text, Dialect::from_path(path)))
    }

    /// Clean a buffer with an explicit dialect
    pub fn clean_with_dialect(&self, text: &str, dialect: Dialect) -> SweepOutcome {
        let ScanOutcome { statements, method } = find_statements(text, dialect);
        let found_count = statements.len();

        let eligible = filter(&statements, &self.config);
        log::debug!(
            "{dialect}: {found_count} statement(s) found, {} eligible",
            eligible.len()
        );

        let result = remove_all(text, &eligible, &self.config);
        let report = report(text, &result);

        SweepOutcome {
            dialect,
            found_count,
            method,
            result,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_structural_path() {
        let outcome = find_statements("const s = 'console.log(1)';\nconsole.log(2);\n", Dialect::JavaScript);
        assert_eq!(outcome.method, ScanMethod::Structural);
        assert_eq!(outcome.statements.len(), 1);
        assert_eq!(outcome.statements[0].line, 2);
    }

    #[test]
    fn test_fallback_on_broken_syntax() {
        let outcome = find_statements("if (x) {\n  console.log(x);\n", Dialect::TypeScript);
        assert!(outcome.method.is_lexical());
        assert_eq!(outcome.statements.len(), 1);
    }

    #[test]
    fn test_fallback_for_dialects_without_grammar() {
        let outcome = find_statements("def f():\n    print('x')\n", Dialect::Python);
        assert!(outcome.method.is_lexical());
        assert_eq!(outcome.statements[0].raw_text, "print('x')");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RemovalConfig {
            max_empty_lines: 10_000,
            ..Default::default()
        };
        assert!(matches!(
            Sweeper::new(config),
            Err(SweepError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_clean_str_filters_by_config() {
        let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
        let outcome = sweeper.clean_str(
            "console.log('a');\nconsole.error('b');\n",
            Some("app.js"),
        );

        assert_eq!(outcome.dialect, Dialect::JavaScript);
        assert_eq!(outcome.found_count, 2);
        assert_eq!(outcome.result.clean_text, "console.error('b');\n");
        assert_eq!(outcome.report.removed_count, 1);
        assert!(outcome.is_changed());
    }

    #[test]
    fn test_java_system_out() {
        let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
        let code = "class A {\n  void f() {\n    System.out.println(\"x\");\n    run();\n  }\n}\n";
        let outcome = sweeper.clean_str(code, Some("A.java"));
        assert!(outcome.method.is_lexical());
        assert_eq!(
            outcome.result.clean_text,
            "class A {\n  void f() {\n    run();\n  }\n}\n"
        );
    }

    #[test]
    fn test_clean_file_reads_without_writing() {
        let mut file = tempfile::Builder::new().suffix(".ts").tempfile().unwrap();
        write!(file, "let a: number = 1;\ndebugger;\n").unwrap();

        let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
        let outcome = sweeper.clean_file(file.path()).unwrap();

        assert_eq!(outcome.dialect, Dialect::TypeScript);
        assert_eq!(outcome.method, ScanMethod::Structural);
        assert_eq!(outcome.result.clean_text, "let a: number = 1;\n");
        let on_disk = std::fs::read_to_string(file.path()).unwrap();
        assert!(on_disk.contains("debugger"));
    }

    #[test]
    fn test_clean_file_missing() {
        let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
        let err = sweeper.clean_file("/definitely/not/here.js").unwrap_err();
        assert!(matches!(err, SweepError::Io(_)));
    }
}
