use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the layers around the physics core.
///
/// The stepping loop itself is infallible: every per-step operation is plain
/// arithmetic over state that was validated when the scenario was built.
/// Only scenario loading and report export can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// A scenario request that cannot be satisfied, such as random spawning
    /// with no free space left.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// Scenario file did not parse as JSON.
    #[error("malformed scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// Propagated I/O errors from scenario loading or report export.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
