use sprig_html::BuildError;
use thiserror::Error;

/// Failure of the cleaning pipeline.
#[derive(Debug, Error)]
pub enum CleanError {
    /// The markup could not be built into a tree.
    #[error("failed to build tree: {0}")]
    Build(#[from] BuildError),

    /// A removal policy could not be decoded.
    #[error("invalid removal policy: {0}")]
    Policy(#[from] serde_json::Error),
}
