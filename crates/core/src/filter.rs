use crate::config::RemovalConfig;
use crate::types::DebugStatement;

/// Keep the statements `config` allows to be removed, in their original order
pub fn filter(statements: &[DebugStatement], config: &RemovalConfig) -> Vec<DebugStatement> {
    statements
        .iter()
        .filter(|statement| config.allows(statement))
        .cloned()
        .collect()
}
