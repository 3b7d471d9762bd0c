use std::fmt;

/// Errors reported by the segmentation engine.
///
/// Every configuration problem and every degenerate computation surfaces as
/// one of these variants; no partial segment list is ever returned alongside
/// an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentationError {
    /// Fit method name not in the supported set
    UnsupportedFitMethod(String),
    /// Error method name not in the supported set
    UnsupportedErrorMethod(String),
    /// Segmentation algorithm name not in the supported set
    UnsupportedAlgorithm(String),
    /// `max_error` outside the unit space of the chosen error method
    BudgetOutOfRange { max_error: f64, reason: &'static str },
    /// Invalid tuning parameter (error growth, batch size)
    InvalidParameter(String),
    /// Fewer than two samples
    SequenceTooShort(usize),
    /// NaN or infinite sample
    NonFiniteValue { index: usize },
    /// Requested range does not fit the sequence
    InvalidRange { start: usize, end: usize, len: usize },
    /// Numerical degeneracy inside an algorithm
    Degenerate(String),
    /// Produced segments violate the contiguity invariant
    Discontiguous(String),
}

impl fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentationError::UnsupportedFitMethod(name) => {
                write!(f, "Unsupported fit method: {}", name)
            }
            SegmentationError::UnsupportedErrorMethod(name) => {
                write!(f, "Unsupported error method: {}", name)
            }
            SegmentationError::UnsupportedAlgorithm(name) => {
                write!(f, "Unsupported segmentation algorithm: {}", name)
            }
            SegmentationError::BudgetOutOfRange { max_error, reason } => {
                write!(f, "max_error {} out of range: {}", max_error, reason)
            }
            SegmentationError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SegmentationError::SequenceTooShort(len) => {
                write!(f, "Sequence too short: {} samples (need at least 2)", len)
            }
            SegmentationError::NonFiniteValue { index } => {
                write!(f, "Non-finite sample at index {}", index)
            }
            SegmentationError::InvalidRange { start, end, len } => write!(
                f,
                "Invalid range [{}, {}] for sequence of length {}",
                start, end, len
            ),
            SegmentationError::Degenerate(msg) => write!(f, "Degenerate segmentation: {}", msg),
            SegmentationError::Discontiguous(msg) => {
                write!(f, "Segments are not contiguous: {}", msg)
            }
        }
    }
}

impl std::error::Error for SegmentationError {}

impl SegmentationError {
    /// True for errors caused by the caller's configuration rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SegmentationError::UnsupportedFitMethod(_)
                | SegmentationError::UnsupportedErrorMethod(_)
                | SegmentationError::UnsupportedAlgorithm(_)
                | SegmentationError::BudgetOutOfRange { .. }
                | SegmentationError::InvalidParameter(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SegmentationError>;
