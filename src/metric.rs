//! Error strategies: how well a segment explains the samples it spans
//!
//! Both metrics re-derive the least-squares fit of the segment's range, so a
//! score does not depend on which [`FitMethod`](crate::FitMethod) produced
//! the candidate. Lower is always better.

use crate::error::{Result, SegmentationError};
use crate::regression::least_squares_line_fit;
use crate::types::{Segment, Sequence};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strategy scoring a candidate [`Segment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorMethod {
    /// Residual sum of squares, in squared signal units
    #[default]
    SumSquaredResiduals,
    /// `1 - R²`, unitless in `[0, 1]`
    RSquared,
}

impl ErrorMethod {
    pub fn error(&self, sequence: &Sequence<'_>, segment: &Segment) -> f64 {
        let line = least_squares_line_fit(sequence, segment.range());
        match self {
            ErrorMethod::SumSquaredResiduals => line.ssr,
            ErrorMethod::RSquared => 1.0 - line.r_squared,
        }
    }

    /// Check that `max_error` lives in this metric's unit space.
    ///
    /// SSR budgets are any non-negative value. `1 - R²` never exceeds 1, so
    /// a budget above 1 is almost certainly an SSR budget passed by mistake
    /// and is rejected.
    pub fn validate_budget(&self, max_error: f64) -> Result<()> {
        if !max_error.is_finite() || max_error < 0.0 {
            return Err(SegmentationError::BudgetOutOfRange {
                max_error,
                reason: "must be finite and non-negative",
            });
        }
        if *self == ErrorMethod::RSquared && max_error > 1.0 {
            return Err(SegmentationError::BudgetOutOfRange {
                max_error,
                reason: "r-squared budgets are unitless and must lie in [0, 1]",
            });
        }
        Ok(())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorMethod::SumSquaredResiduals => "ssr",
            ErrorMethod::RSquared => "rsq",
        }
    }
}

impl FromStr for ErrorMethod {
    type Err = SegmentationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssr" | "sum-squared-residuals" | "sse" => Ok(ErrorMethod::SumSquaredResiduals),
            "rsq" | "r-squared" | "r2" => Ok(ErrorMethod::RSquared),
            _ => Err(SegmentationError::UnsupportedErrorMethod(s.to_string())),
        }
    }
}

impl fmt::Display for ErrorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
