//! Fit strategies: how a candidate segment's endpoint values are derived

use crate::error::SegmentationError;
use crate::regression::least_squares_line_fit;
use crate::types::{Segment, SeqRange, Sequence};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strategy turning an index range into a candidate [`Segment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FitMethod {
    /// Least-squares line evaluated at both ends of the range
    #[default]
    Regression,
    /// Raw sample values at both ends of the range, no smoothing
    Interpolation,
}

impl FitMethod {
    /// Candidate segment for `range`. The range must span at least two
    /// samples; every algorithm guarantees this by construction.
    pub fn fit(&self, sequence: &Sequence<'_>, range: SeqRange) -> Segment {
        match self {
            FitMethod::Regression => {
                let line = least_squares_line_fit(sequence, range);
                Segment::new(
                    range.start,
                    line.predict(range.start),
                    range.end,
                    line.predict(range.end),
                )
            }
            FitMethod::Interpolation => {
                let values = sequence.values();
                Segment::new(range.start, values[range.start], range.end, values[range.end])
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FitMethod::Regression => "ls",
            FitMethod::Interpolation => "inter",
        }
    }
}

impl FromStr for FitMethod {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ls" | "regression" | "least-squares" => Ok(FitMethod::Regression),
            "inter" | "interpolation" | "interpolate" => Ok(FitMethod::Interpolation),
            _ => Err(SegmentationError::UnsupportedFitMethod(s.to_string())),
        }
    }
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
