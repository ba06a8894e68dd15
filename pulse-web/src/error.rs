use std::io::Error as IoError;

use thiserror::Error;

/// Fatal startup errors for the server binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
}
