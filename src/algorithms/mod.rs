//! Segmentation algorithms
//!
//! All three produce an ordered, contiguous segment list covering the
//! requested range. They share a [`Scorer`] that binds the sequence to the
//! selected fit and error strategies.

pub mod bottom_up;
pub mod sliding_window;
pub mod top_down;

pub use bottom_up::bottom_up;
pub use sliding_window::sliding_window;
pub use top_down::{top_down, TopDownParams};

use crate::fit::FitMethod;
use crate::metric::ErrorMethod;
use crate::types::{Segment, SeqRange, Sequence};

/// Sequence bound to a fit strategy and an error strategy
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    sequence: Sequence<'a>,
    fit_method: FitMethod,
    error_method: ErrorMethod,
}

impl<'a> Scorer<'a> {
    pub fn new(sequence: Sequence<'a>, fit_method: FitMethod, error_method: ErrorMethod) -> Self {
        Self {
            sequence,
            fit_method,
            error_method,
        }
    }

    pub fn sequence(&self) -> &Sequence<'a> {
        &self.sequence
    }

    pub fn fit(&self, start: usize, end: usize) -> Segment {
        self.fit_method.fit(&self.sequence, SeqRange { start, end })
    }

    pub fn error(&self, segment: &Segment) -> f64 {
        self.error_method.error(&self.sequence, segment)
    }

    /// Fit `[start, end]` and score the result
    pub fn score(&self, start: usize, end: usize) -> (Segment, f64) {
        let segment = self.fit(start, end);
        let error = self.error(&segment);
        (segment, error)
    }
}
