use anyhow::{Context as AnyhowContext, Result};

/// One `--include` / `--exclude` entry
#[derive(Debug, Clone)]
enum Rule {
    /// Plain path: matches itself and everything beneath it
    Prefix(String),
    Glob(glob::Pattern),
}

impl Rule {
    fn parse(raw: &str) -> Result<Option<Self>> {
        let normalized = normalize_filter_path(raw);
        if normalized.is_empty() {
            return Ok(None);
        }

        if !normalized.contains(['*', '?', '[']) {
            return Ok(Some(Rule::Prefix(normalized)));
        }

        let pattern = glob::Pattern::new(&normalized)
            .with_context(|| format!("Invalid glob pattern `{raw}`"))?;
        Ok(Some(Rule::Glob(pattern)))
    }

    fn matches(&self, rel_path: &str) -> bool {
        match self {
            Rule::Prefix(prefix) => path_prefix_matches_normalized(prefix, rel_path),
            Rule::Glob(pattern) => pattern.matches(rel_path),
        }
    }
}

/// Include/exclude rules applied to paths relative to the walk root
#[derive(Debug, Clone, Default)]
pub(crate) struct PathFilters {
    include: Vec<Rule>,
    exclude: Vec<Rule>,
}

impl PathFilters {
    pub(crate) fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let parse_all = |raw: &[String]| -> Result<Vec<Rule>> {
            let mut rules = Vec::new();
            for entry in raw {
                if let Some(rule) = Rule::parse(entry)? {
                    rules.push(rule);
                }
            }
            Ok(rules)
        };

        Ok(Self {
            include: parse_all(include)?,
            exclude: parse_all(exclude)?,
        })
    }

    pub(crate) fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    /// Exclusion wins over inclusion
    pub(crate) fn path_allowed(&self, rel_path: &str) -> bool {
        let rel_path = rel_path.replace('\\', "/");

        if !self.include.is_empty() && !self.include.iter().any(|rule| rule.matches(&rel_path)) {
            return false;
        }

        !self.exclude.iter().any(|rule| rule.matches(&rel_path))
    }
}

fn normalize_filter_path(raw: &str) -> String {
    let mut value = raw.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    let value = value.trim_matches('/');
    if value == "." {
        return String::new();
    }
    value.to_string()
}

fn path_prefix_matches_normalized(prefix: &str, path: &str) -> bool {
    if path == prefix {
        return true;
    }

    if !path.starts_with(prefix) {
        return false;
    }

    path.as_bytes().get(prefix.len()) == Some(&b'/')
}
