use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Scanner producing the candidate file set for incremental indexing.
pub struct FileScanner {
    root: PathBuf,
    max_file_size: u64,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_file_size: max_file_size_from_env(),
        }
    }

    /// Overrides the size cap (primarily for tests and embedding callers).
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Scan the project tree for indexable files (.gitignore aware).
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true) // do not index hidden files
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false); // honor .gitignore even in non-git trees
        builder.filter_entry(move |entry| !FileScanner::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > self.max_file_size {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {})",
                                path.display(),
                                meta.len(),
                                self.max_file_size
                            );
                            continue;
                        }
                    }

                    if !Self::is_indexable(path) {
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::info!("Found {} indexable files", files.len());
        files
    }

    /// Check if the file carries an indexable code or text extension.
    fn is_indexable(path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            let ext = ext.to_lowercase();
            return INDEXABLE_EXTENSIONS
                .iter()
                .any(|candidate| candidate == &ext);
        }
        false
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
}

const IGNORED_SCOPES: &[&str] = &[
    // VCS / tooling
    ".git",
    ".codemind",
    ".idea",
    ".vscode",
    // virtualenvs / caches
    "venv",
    ".venv",
    "__pycache__",
    ".cache",
    ".gradle",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".tox",
    "htmlcov",
    // builds / artifacts
    "node_modules",
    "dist",
    "build",
    "target",
    "vendor",
    "bin",
    "obj",
    "out",
    "logs",
    "tmp",
    "temp",
];

const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

fn max_file_size_from_env() -> u64 {
    let mb = std::env::var("CODEMIND_MAX_FILE_SIZE_MB")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB)
        .clamp(1, 1024);
    mb * 1024 * 1024
}

/// Code and text extensions worth indexing; everything else (binaries,
/// media, archives) is noise for a semantic index.
const INDEXABLE_EXTENSIONS: &[&str] = &[
    // Code
    "py",
    "js",
    "ts",
    "jsx",
    "tsx",
    "java",
    "c",
    "cpp",
    "h",
    "hpp",
    "cs",
    "go",
    "rs",
    "rb",
    "php",
    "swift",
    "kt",
    "scala",
    "r",
    "m",
    "mm",
    "sh",
    "bash",
    "zsh",
    "fish",
    // Docs / config / data
    "txt",
    "md",
    "rst",
    "json",
    "yaml",
    "yml",
    "toml",
    "xml",
    "html",
    "css",
    "scss",
    "sass",
    "sql",
    "graphql",
    "proto",
];
