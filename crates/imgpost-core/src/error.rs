use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("file has no usable name: {}", .0.display())]
    MissingFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
