use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use sweep_core::{RemovalConfig, Sweeper};

use crate::flags::KindFlag;

/// Looked up in the working directory when `--config` is absent
pub(crate) const DEFAULT_CONFIG_FILE: &str = "debug-sweep.toml";

/// Contents of a `debug-sweep.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SettingsFile {
    pub(crate) removal: RemovalConfig,
    pub(crate) include: Vec<String>,
    pub(crate) exclude: Vec<String>,
    pub(crate) jobs: Option<usize>,
}

impl SettingsFile {
    pub(crate) fn parse(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings
            .removal
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid [removal] section")?;
        Ok(settings)
    }

    /// Read `explicit`, or the default file under `cwd` when it exists
    pub(crate) fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let settings = Self::parse(&source)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

/// Removal switches given on the command line
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct RemovalArgs {
    /// Never remove this kind (repeatable)
    #[arg(long, value_enum)]
    pub(crate) keep: Vec<KindFlag>,

    /// Also remove this kind (repeatable)
    #[arg(long, value_enum)]
    pub(crate) remove: Vec<KindFlag>,

    /// Longest run of blank lines kept after cleanup
    #[arg(long)]
    pub(crate) max_empty_lines: Option<usize>,

    /// Leave whitespace exactly as the removals left it
    #[arg(long)]
    pub(crate) no_clean_whitespace: bool,
}

impl RemovalArgs {
    /// Layer the flags over `config`; `--keep` wins over `--remove`
    pub(crate) fn apply(&self, config: &mut RemovalConfig) {
        for kind in &self.remove {
            kind.apply(config, true);
        }
        for kind in &self.keep {
            kind.apply(config, false);
        }
        if let Some(max) = self.max_empty_lines {
            config.max_empty_lines = max;
        }
        if self.no_clean_whitespace {
            config.clean_whitespace = false;
        }
    }

    pub(crate) fn build_sweeper(&self, settings: &SettingsFile) -> Result<Sweeper> {
        let mut config = settings.removal.clone();
        self.apply(&mut config);
        if !config.removes_anything() {
            log::warn!("Every removal switch is off; nothing will be removed");
        }
        Ok(Sweeper::new(config)?)
    }
}
