use std::error::Error;
use std::fmt;

/// Custom error type for feature-frame contract violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    DuplicateFeature(String),
    UnknownFeature(String),
    ColumnCountMismatch { names: usize, columns: usize },
    RowCountMismatch { feature: String, expected: usize, found: usize },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameError::DuplicateFeature(name) => {
                write!(f, "Feature name '{}' appears more than once", name)
            }
            FrameError::UnknownFeature(name) => {
                write!(f, "Feature '{}' is not present in the frame", name)
            }
            FrameError::ColumnCountMismatch { names, columns } => write!(
                f,
                "Got {} feature names for a matrix with {} columns",
                names, columns
            ),
            FrameError::RowCountMismatch {
                feature,
                expected,
                found,
            } => write!(
                f,
                "Feature '{}' has {} rows but the frame has {}",
                feature, found, expected
            ),
        }
    }
}

impl Error for FrameError {}
