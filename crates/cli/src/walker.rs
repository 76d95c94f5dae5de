use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use sweep_core::Dialect;

use crate::path_filters::PathFilters;

/// Files above this size are generated or vendored more often than not
pub(crate) const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

const IGNORED_SCOPES: &[&str] = &[
    // VCS / tooling
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    // JS ecosystem
    "node_modules",
    "bower_components",
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".turbo",
    ".cache",
    ".parcel-cache",
    "coverage",
    // build output
    "dist",
    "build",
    "out",
    "target",
    // python
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    // jvm
    ".gradle",
];

const MINIFIED_SUFFIXES: &[&str] = &[".min.js", ".min.mjs", ".bundle.js"];

/// Finds files worth sweeping under a set of roots
pub(crate) struct FileWalker<'a> {
    filters: &'a PathFilters,
}

impl<'a> FileWalker<'a> {
    pub(crate) fn new(filters: &'a PathFilters) -> Self {
        Self { filters }
    }

    /// Expand `roots` into candidate files (.gitignore aware), sorted and deduplicated.
    ///
    /// A root that is itself a file is taken as given, skipping dialect and
    /// filter checks but not the size limit.
    pub(crate) fn collect(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for root in roots {
            if root.is_file() {
                if !Self::too_large(root, root.metadata().ok().map(|m| m.len())) {
                    files.push(root.clone());
                }
                continue;
            }
            if !root.is_dir() {
                log::warn!("Skipping {}: no such file or directory", root.display());
                continue;
            }
            self.walk(root, &mut files);
        }

        files.sort();
        files.dedup();
        log::debug!("Found {} candidate file(s)", files.len());
        files
    }

    fn walk(&self, root: &Path, files: &mut Vec<PathBuf>) {
        let scope_root = root.to_path_buf();
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);
        builder.filter_entry(move |entry| !is_ignored_scope(entry.path(), &scope_root));

        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            if !Dialect::is_supported_path(path) || is_minified(path) {
                continue;
            }

            let rel_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned();
            if self.filters.is_active() && !self.filters.path_allowed(&rel_path) {
                log::debug!("Filtered out {rel_path}");
                continue;
            }

            if Self::too_large(path, entry.metadata().ok().map(|m| m.len())) {
                continue;
            }

            files.push(path.to_path_buf());
        }
    }

    fn too_large(path: &Path, len: Option<u64>) -> bool {
        match len {
            Some(len) if len > MAX_FILE_SIZE_BYTES => {
                log::debug!(
                    "Skipping large file {} ({} bytes > {})",
                    path.display(),
                    len,
                    MAX_FILE_SIZE_BYTES
                );
                true
            }
            _ => false,
        }
    }
}

fn is_ignored_scope(path: &Path, root: &Path) -> bool {
    if let Ok(relative) = path.strip_prefix(root) {
        for component in relative.components() {
            if let std::path::Component::Normal(name) = component {
                let lowered = name.to_string_lossy().to_lowercase();
                if IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered) {
                    return true;
                }
            }
        }
    }
    false
}

fn is_minified(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_lowercase)
        .is_some_and(|name| MINIFIED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}
