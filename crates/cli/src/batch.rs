use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sweep_core::{Dialect, ScanMethod, Sweeper};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// What to do with a file once it has been cleaned
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Write changed files back in place
    Write,
    /// Report only
    DryRun,
}

/// Per-file result of a batch run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileSummary {
    pub(crate) path: String,
    pub(crate) dialect: Dialect,
    pub(crate) lexical: bool,
    pub(crate) found_count: usize,
    pub(crate) removed_count: usize,
    pub(crate) lines_reduced: usize,
    pub(crate) changed: bool,
    pub(crate) written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl FileSummary {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            dialect: Dialect::from_path(path),
            lexical: false,
            found_count: 0,
            removed_count: 0,
            lines_reduced: 0,
            changed: false,
            written: false,
            error: Some(error),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BatchSummary {
    pub(crate) files_scanned: usize,
    pub(crate) files_changed: usize,
    pub(crate) statements_removed: usize,
    pub(crate) lines_reduced: usize,
    pub(crate) errors: usize,
    pub(crate) cancelled: bool,
    pub(crate) files: Vec<FileSummary>,
}

impl BatchSummary {
    fn push(&mut self, file: FileSummary) {
        self.files_scanned += 1;
        if file.error.is_some() {
            self.errors += 1;
        }
        if file.changed {
            self.files_changed += 1;
        }
        self.statements_removed += file.removed_count;
        self.lines_reduced += file.lines_reduced;
        self.files.push(file);
    }
}

/// Clean `files` with at most `jobs` in flight, stopping early on Ctrl-C
pub(crate) async fn run_batch(
    files: Vec<PathBuf>,
    sweeper: Arc<Sweeper>,
    mode: WriteMode,
    jobs: usize,
) -> Result<BatchSummary> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let listener = {
        let cancelled = Arc::clone(&cancelled);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted; finishing files already in progress");
                cancelled.store(true, Ordering::SeqCst);
            }
        })
    };

    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();
    let mut summary = BatchSummary::default();

    for path in files {
        if cancelled.load(Ordering::SeqCst) {
            break;
        }
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        if cancelled.load(Ordering::SeqCst) {
            break;
        }

        let sweeper = Arc::clone(&sweeper);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            sweep_file(&path, &sweeper, mode)
        });

        while let Some(done) = tasks.try_join_next() {
            summary.push(done?);
        }
    }

    while let Some(done) = tasks.join_next().await {
        summary.push(done?);
    }
    listener.abort();

    summary.cancelled = cancelled.load(Ordering::SeqCst);
    summary.files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(summary)
}

fn sweep_file(path: &Path, sweeper: &Sweeper, mode: WriteMode) -> FileSummary {
    let outcome = match sweeper.clean_file(path) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::warn!("Skipping {}: {e}", path.display());
            return FileSummary::failed(path, e.to_string());
        }
    };

    if let ScanMethod::Lexical { reason } = &outcome.method {
        log::info!(
            "{} was scanned lexically ({reason}); matches inside strings or comments are possible",
            path.display()
        );
    }

    let changed = outcome.is_changed();
    let mut written = false;
    let mut error = None;
    if changed && mode == WriteMode::Write {
        match std::fs::write(path, &outcome.result.clean_text) {
            Ok(()) => written = true,
            Err(e) => {
                log::warn!("Failed to write {}: {e}", path.display());
                error = Some(e.to_string());
            }
        }
    }

    if changed {
        log::debug!("{}: {}", path.display(), outcome.report);
    }

    FileSummary {
        path: path.display().to_string(),
        dialect: outcome.dialect,
        lexical: outcome.method.is_lexical(),
        found_count: outcome.found_count,
        removed_count: outcome.result.removed_count,
        lines_reduced: outcome.report.lines_reduced,
        changed,
        written,
        error,
    }
}
