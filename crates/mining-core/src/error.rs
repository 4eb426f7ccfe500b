//! Error types for mining-core

use thiserror::Error;

/// Result type alias for mining-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any remote call was made
    #[error("{0}")]
    InvalidInput(String),

    /// Agent processing failed; the message is shown to the user as is
    #[error("{0}")]
    ProcessingFailed(String),
}
