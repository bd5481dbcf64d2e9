use std::path::{Path, PathBuf};

pub const STATE_DIR_NAME: &str = ".codemind";
pub const METADATA_FILE_NAME: &str = "index_metadata.json";
pub const LOG_FILE_NAME: &str = "codemind.log";

#[must_use]
pub fn state_dir_for_project_root(root: &Path) -> PathBuf {
    root.join(STATE_DIR_NAME)
}

#[must_use]
pub fn metadata_path_for_root(root: &Path) -> PathBuf {
    state_dir_for_project_root(root).join(METADATA_FILE_NAME)
}

#[must_use]
pub fn log_path_for_root(root: &Path) -> PathBuf {
    state_dir_for_project_root(root).join(LOG_FILE_NAME)
}

/// All state paths derived from one project root. Derived as a unit so a
/// root swap can never leave the metadata file pointing into the old tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    state_dir: PathBuf,
    metadata_file: PathBuf,
    log_file: PathBuf,
}

impl ProjectLayout {
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let state_dir = state_dir_for_project_root(&root);
        let metadata_file = metadata_path_for_root(&root);
        let log_file = log_path_for_root(&root);
        Self {
            root,
            state_dir,
            metadata_file,
            log_file,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    #[must_use]
    pub fn metadata_file(&self) -> &Path {
        &self.metadata_file
    }

    #[must_use]
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}
