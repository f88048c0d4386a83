//! Error types for the probe.

use thiserror::Error;

/// Failure raised by a processing unit from inside `compute`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    /// The unit was handed views whose shape does not match its channel counts.
    #[error("channel mismatch: expected {expected} {direction} views, got {got}")]
    ChannelMismatch {
        direction: &'static str,
        expected: usize,
        got: usize,
    },
    /// `compute` was called before `init`.
    #[error("unit not initialized")]
    NotInitialized,
    /// Unit-specific failure.
    #[error("unit failure: {0}")]
    Unit(String),
}

impl From<String> for ComputeError {
    fn from(value: String) -> Self {
        Self::Unit(value)
    }
}

/// Errors surfaced by a probe run or by report export.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("compute failed in phase {phase}: {source}")]
    Compute {
        phase: usize,
        #[source]
        source: ComputeError,
    },
    #[error("no output channels to export")]
    NoOutputs,
    #[error("unknown processing unit: {0}")]
    UnknownUnit(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Wav(#[from] hound::Error),
}
