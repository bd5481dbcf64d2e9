use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjectError>;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("path must be a non-empty string")]
    EmptyPath,

    #[error("path {path:?} is outside the project root {}", .root.display())]
    OutsideRoot { path: String, root: PathBuf },

    #[error("failed to resolve path {path:?}")]
    Unresolvable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
