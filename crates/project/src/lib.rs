//! # Codemind Project
//!
//! Project-root discovery, state-dir layout, and the path safety boundary
//! for the codemind subsystem.
//!
//! Every caller-supplied path must pass through [`ProjectContext::resolve`]
//! before any file is read; the resolver is the single enforcement point
//! that keeps all filesystem access inside the project root.

mod context;
mod discovery;
mod error;
mod layout;
#[cfg(test)]
mod test_support;

pub use context::ProjectContext;
pub use discovery::{find_project_root, PROJECT_MARKERS, ROOT_ENV_VARS};
pub use error::{ProjectError, Result};
pub use layout::{
    log_path_for_root, metadata_path_for_root, state_dir_for_project_root, ProjectLayout,
    LOG_FILE_NAME, METADATA_FILE_NAME, STATE_DIR_NAME,
};
