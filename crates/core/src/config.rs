use crate::error::{Result, SweepError};
use crate::types::{ConsoleMethod, DebugStatement, StatementKind};
use serde::{Deserialize, Serialize};

/// Which debug statements to remove and how to tidy up afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RemovalConfig {
    pub remove_console_log: bool,
    pub remove_console_warn: bool,
    pub remove_console_error: bool,
    pub remove_console_info: bool,
    pub remove_console_debug: bool,
    pub remove_console_trace: bool,

    /// `debugger` statements
    pub remove_debugger: bool,

    /// Bare `print(...)` calls
    pub remove_print: bool,

    /// `System.out.println(...)` calls
    pub remove_system_out: bool,

    /// Longest run of blank lines kept by whitespace cleanup
    pub max_empty_lines: usize,

    /// Collapse blank runs, trim trailing whitespace and fix the final newline
    pub clean_whitespace: bool,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            remove_console_log: true,
            remove_console_warn: true,
            remove_console_error: false,
            remove_console_info: true,
            remove_console_debug: true,
            remove_console_trace: true,
            remove_debugger: true,
            remove_print: true,
            remove_system_out: true,
            max_empty_lines: 2,
            clean_whitespace: true,
        }
    }
}

impl RemovalConfig {
    /// Upper bound for `max_empty_lines`; anything larger is a typo
    pub const MAX_EMPTY_LINES_LIMIT: usize = 100;

    /// Remove every kind of statement, `console.error` included
    pub fn remove_everything() -> Self {
        Self {
            remove_console_error: true,
            ..Default::default()
        }
    }

    /// Remove nothing; useful as a base for explicit opt-ins
    pub fn remove_nothing() -> Self {
        Self {
            remove_console_log: false,
            remove_console_warn: false,
            remove_console_error: false,
            remove_console_info: false,
            remove_console_debug: false,
            remove_console_trace: false,
            remove_debugger: false,
            remove_print: false,
            remove_system_out: false,
            ..Default::default()
        }
    }

    /// Parse a TOML document using the camelCase option names
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| SweepError::invalid_config(e.message().to_string()))?;
        config.validate().map_err(SweepError::invalid_config)?;
        Ok(config)
    }

    /// Switch for a console method; `table`, `time` and `timeEnd` have none
    pub fn console_switch(&self, method: ConsoleMethod) -> Option<bool> {
        match method {
            ConsoleMethod::Log => Some(self.remove_console_log),
            ConsoleMethod::Warn => Some(self.remove_console_warn),
            ConsoleMethod::Error => Some(self.remove_console_error),
            ConsoleMethod::Info => Some(self.remove_console_info),
            ConsoleMethod::Debug => Some(self.remove_console_debug),
            ConsoleMethod::Trace => Some(self.remove_console_trace),
            ConsoleMethod::Table | ConsoleMethod::Time | ConsoleMethod::TimeEnd => None,
        }
    }

    /// Whether `statement` is eligible for removal
    pub fn allows(&self, statement: &DebugStatement) -> bool {
        match statement.kind {
            StatementKind::Console => statement
                .sub_kind
                .and_then(|method| self.console_switch(method))
                .unwrap_or(false),
            StatementKind::Debugger => self.remove_debugger,
            StatementKind::Print => self.remove_print,
            StatementKind::SystemOut => self.remove_system_out,
        }
    }

    /// True when at least one switch is on
    pub fn removes_anything(&self) -> bool {
        self.remove_console_log
            || self.remove_console_warn
            || self.remove_console_error
            || self.remove_console_info
            || self.remove_console_debug
            || self.remove_console_trace
            || self.remove_debugger
            || self.remove_print
            || self.remove_system_out
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_empty_lines > Self::MAX_EMPTY_LINES_LIMIT {
            return Err(format!(
                "maxEmptyLines ({}) cannot exceed {}",
                self.max_empty_lines,
                Self::MAX_EMPTY_LINES_LIMIT
            ));
        }

        Ok(())
    }
}
