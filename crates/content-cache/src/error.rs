use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CacheError>;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {} with any supported encoding: {encodings:?}", .path.display())]
    Decode {
        path: PathBuf,
        encodings: Vec<&'static str>,
    },
}
