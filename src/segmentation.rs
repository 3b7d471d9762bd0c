//! Segmentation facade
//!
//! Validates the method combination, dispatches to the selected algorithm
//! and checks the contiguity invariant of the result. Every run builds its
//! own segment list, nothing is carried over between calls.

use crate::algorithms::{bottom_up, sliding_window, top_down, Scorer, TopDownParams};
use crate::error::{Result, SegmentationError};
use crate::fit::FitMethod;
use crate::metric::ErrorMethod;
use crate::types::{check_contiguous, Segment, SeqRange, Sequence};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segmentation algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    SlidingWindow,
    BottomUp,
    #[default]
    TopDown,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::SlidingWindow => "sw",
            Algorithm::BottomUp => "bu",
            Algorithm::TopDown => "td",
        }
    }
}

impl FromStr for Algorithm {
    type Err = SegmentationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sw" | "sliding-window" | "sliding_window" => Ok(Algorithm::SlidingWindow),
            "bu" | "bottom-up" | "bottom_up" => Ok(Algorithm::BottomUp),
            "td" | "top-down" | "top_down" => Ok(Algorithm::TopDown),
            _ => Err(SegmentationError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one segmentation run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentationOptions {
    pub algorithm: Algorithm,
    pub fit_method: FitMethod,
    pub error_method: ErrorMethod,
    /// Tolerance a segment's error must not exceed; units follow `error_method`
    pub max_error: f64,
    /// Top-down only: fractional budget relaxation per split level
    pub error_growth: f64,
    /// Top-down only: stride between split candidates
    pub batch_size: Option<usize>,
    /// Inclusive sub-range to segment, whole sequence when `None`
    pub range: Option<SeqRange>,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::TopDown,
            fit_method: FitMethod::Regression,
            error_method: ErrorMethod::SumSquaredResiduals,
            max_error: 1.0,
            error_growth: 0.0,
            batch_size: None,
            range: None,
        }
    }
}

impl SegmentationOptions {
    pub fn new(algorithm: Algorithm, max_error: f64) -> Self {
        Self {
            algorithm,
            max_error,
            ..Self::default()
        }
    }

    pub fn with_fit_method(mut self, fit_method: FitMethod) -> Self {
        self.fit_method = fit_method;
        self
    }

    pub fn with_error_method(mut self, error_method: ErrorMethod) -> Self {
        self.error_method = error_method;
        self
    }

    pub fn with_error_growth(mut self, error_growth: f64) -> Self {
        self.error_growth = error_growth;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_range(mut self, range: SeqRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn top_down_params(&self) -> TopDownParams {
        TopDownParams {
            max_error: self.max_error,
            error_growth: self.error_growth,
            batch_size: self.batch_size,
        }
    }

    /// Check the budget against the error method and the top-down tuning
    pub fn validate(&self) -> Result<()> {
        self.error_method.validate_budget(self.max_error)?;
        self.top_down_params().validate()
    }
}

/// Validated segmentation configuration, reusable across signals
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: SegmentationOptions,
}

impl Segmenter {
    pub fn new(options: SegmentationOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Build from method names as used on the command line (`"td"`, `"ls"`, `"ssr"`, ...)
    pub fn from_names(algorithm: &str, fit_method: &str, error_method: &str, max_error: f64) -> Result<Self> {
        let options = SegmentationOptions {
            algorithm: algorithm.parse()?,
            fit_method: fit_method.parse()?,
            error_method: error_method.parse()?,
            max_error,
            ..SegmentationOptions::default()
        };
        Self::new(options)
    }

    pub fn options(&self) -> &SegmentationOptions {
        &self.options
    }

    /// Segment `values` into an ordered, contiguous list of line segments
    pub fn segment(&self, values: &[f64]) -> Result<Vec<Segment>> {
        let sequence = Sequence::new(values)?;
        let range = match self.options.range {
            Some(range) => sequence.check_range(range)?,
            None => sequence.full_range(),
        };
        let scorer = Scorer::new(sequence, self.options.fit_method, self.options.error_method);

        debug!(
            algorithm = %self.options.algorithm,
            fit = %self.options.fit_method,
            error = %self.options.error_method,
            max_error = self.options.max_error,
            samples = values.len(),
            "segmenting sequence"
        );

        let segments = match self.options.algorithm {
            Algorithm::SlidingWindow => sliding_window(&scorer, range, self.options.max_error)?,
            Algorithm::BottomUp => bottom_up(&scorer, range, self.options.max_error)?,
            Algorithm::TopDown => top_down(&scorer, range, self.options.top_down_params())?,
        };

        check_contiguous(&segments, range)?;
        Ok(segments)
    }
}

/// One-shot segmentation with explicit options
pub fn segment(values: &[f64], options: &SegmentationOptions) -> Result<Vec<Segment>> {
    Segmenter::new(options.clone())?.segment(values)
}

/// Segment a sequence and return plain `(x0, y0, x1, y1)` tuples
pub fn segment_points(values: &[f64], options: &SegmentationOptions) -> Result<Vec<(usize, f64, usize, f64)>> {
    Ok(segment(values, options)?
        .into_iter()
        .map(|s| s.points())
        .collect())
}
