//! Top-down divide-and-conquer segmentation
//!
//! Each range is split at the index minimising the summed error of its two
//! halves. A half whose error fits the current budget becomes a segment;
//! otherwise it is split again under a relaxed budget
//! `error_growth * budget + budget`. Noisy flight-log traces rarely fit a
//! line exactly, so a positive `error_growth` bounds the split depth in
//! practice.

use crate::algorithms::Scorer;
use crate::error::{Result, SegmentationError};
use crate::types::{Segment, SeqRange};
use tracing::{debug, trace};

/// Tuning for [`top_down`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownParams {
    pub max_error: f64,
    /// Fractional budget relaxation per split level, `0.0` disables it
    pub error_growth: f64,
    /// Stride between split candidates, `None` scans every index
    pub batch_size: Option<usize>,
}

impl TopDownParams {
    pub fn new(max_error: f64) -> Self {
        Self {
            max_error,
            error_growth: 0.0,
            batch_size: None,
        }
    }

    fn stride(&self) -> usize {
        self.batch_size.unwrap_or(1)
    }

    /// Check `error_growth` and `batch_size`; the budget itself is checked
    /// against the error method by the caller
    pub fn validate(&self) -> Result<()> {
        if !self.error_growth.is_finite() || self.error_growth < 0.0 {
            return Err(SegmentationError::InvalidParameter(format!(
                "error_growth must be finite and >= 0; got {}",
                self.error_growth
            )));
        }
        if self.batch_size == Some(0) {
            return Err(SegmentationError::InvalidParameter(
                "batch_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Work {
    Emit(Segment),
    Split { range: SeqRange, budget: f64 },
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    idx: usize,
    left: Segment,
    left_error: f64,
    right: Segment,
    right_error: f64,
}

/// Scan split candidates `lo + 1, lo + 1 + stride, ...` strictly below `hi`
fn best_split(scorer: &Scorer<'_>, range: SeqRange, stride: usize) -> Option<BestSplit> {
    let mut best: Option<BestSplit> = None;
    for idx in (range.start + 1..range.end).step_by(stride) {
        let (left, left_error) = scorer.score(range.start, idx);
        let (right, right_error) = scorer.score(idx, range.end);
        let total = left_error + right_error;
        let improves = match &best {
            Some(b) => total < b.left_error + b.right_error,
            None => true,
        };
        if improves {
            best = Some(BestSplit {
                idx,
                left,
                left_error,
                right,
                right_error,
            });
        }
    }
    best
}

/// Segment `range` top-down.
///
/// When the whole range already fits `max_error` it is returned as a single
/// segment. Ranges of two samples are always terminal.
pub fn top_down(scorer: &Scorer<'_>, range: SeqRange, params: TopDownParams) -> Result<Vec<Segment>> {
    let range = scorer.sequence().check_range(range)?;
    params.validate()?;
    let stride = params.stride();

    let (whole, whole_error) = scorer.score(range.start, range.end);
    if whole_error <= params.max_error {
        debug!(
            start = range.start,
            end = range.end,
            error = whole_error,
            "top-down: whole range within budget"
        );
        return Ok(vec![whole]);
    }

    let mut segments = Vec::new();
    // LIFO: the right half is pushed first so output stays left to right
    let mut stack = vec![Work::Split {
        range,
        budget: params.max_error,
    }];

    while let Some(work) = stack.pop() {
        let (range, budget) = match work {
            Work::Emit(segment) => {
                segments.push(segment);
                continue;
            }
            Work::Split { range, budget } => (range, budget),
        };

        let Some(split) = best_split(scorer, range, stride) else {
            segments.push(scorer.fit(range.start, range.end));
            continue;
        };
        if !(split.left_error + split.right_error).is_finite() {
            return Err(SegmentationError::Degenerate(format!(
                "non-finite split error in [{}, {}]",
                range.start, range.end
            )));
        }

        trace!(
            start = range.start,
            end = range.end,
            idx = split.idx,
            left_error = split.left_error,
            right_error = split.right_error,
            budget,
            "top-down split"
        );

        let relaxed = params.error_growth * budget + budget;
        let right = if split.right_error <= budget {
            Work::Emit(split.right)
        } else {
            Work::Split {
                range: SeqRange {
                    start: split.idx,
                    end: range.end,
                },
                budget: relaxed,
            }
        };
        let left = if split.left_error <= budget {
            Work::Emit(split.left)
        } else {
            Work::Split {
                range: SeqRange {
                    start: range.start,
                    end: split.idx,
                },
                budget: relaxed,
            }
        };
        stack.push(right);
        stack.push(left);
    }

    debug!(
        start = range.start,
        end = range.end,
        segments = segments.len(),
        "top-down segmentation complete"
    );
    Ok(segments)
}
