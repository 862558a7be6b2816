// Error types shared by the whole engine.
use std::error::Error;
use std::fmt;

/// Error type for trajectory and torque/drag operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellboreError {
    /// Inconsistent or incomplete input: bad survey records, missing section
    /// parameters, incomplete wellbore/string coverage, mismatched WOB/TOB.
    Validation(String),
    /// A depth query outside [0, max] of the trajectory.
    Range(String),
    /// Unrecognized mode at the presentation boundary (CLI output formats,
    /// depth reference names).
    Config(String),
}

impl WellboreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        WellboreError::Validation(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        WellboreError::Range(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        WellboreError::Config(msg.into())
    }
}

impl fmt::Display for WellboreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WellboreError::Validation(msg) => write!(f, "validation error: {}", msg),
            WellboreError::Range(msg) => write!(f, "range error: {}", msg),
            WellboreError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl Error for WellboreError {}

pub type Result<T> = std::result::Result<T, WellboreError>;
