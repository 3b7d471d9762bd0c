//! Greedy sliding-window segmentation
//!
//! A window anchored at `start` grows one sample at a time while the fitted
//! candidate stays within `max_error`. The last accepted candidate is
//! emitted and the next window is anchored on its end index, so consecutive
//! segments share a boundary sample.

use crate::algorithms::Scorer;
use crate::error::{Result, SegmentationError};
use crate::types::{Segment, SeqRange};
use tracing::{debug, trace};

/// Segment `range` with the sliding-window strategy.
///
/// A two-sample window is always accepted since it cannot be split further,
/// which guarantees forward progress for any budget. A non-finite window
/// error fails the run with [`SegmentationError::Degenerate`].
///
/// With the sum of squared residuals, shrinking a window never raises its
/// error, so a larger `max_error` never yields more segments. `1 - R²` has
/// no such property: a window can fit while a shorter one does not, and a
/// larger budget may then end up with more segments.
pub fn sliding_window(scorer: &Scorer<'_>, range: SeqRange, max_error: f64) -> Result<Vec<Segment>> {
    let range = scorer.sequence().check_range(range)?;
    let mut segments = Vec::new();
    let mut start = range.start;

    while start < range.end {
        let mut end = start + 1;
        let mut accepted = scorer.fit(start, end);

        while end < range.end {
            let (candidate, error) = scorer.score(start, end + 1);
            if !error.is_finite() {
                return Err(SegmentationError::Degenerate(format!(
                    "non-finite window error over [{}, {}]: {}",
                    start,
                    end + 1,
                    error
                )));
            }
            if error > max_error {
                trace!(start, end = end + 1, error, max_error, "window rejected");
                break;
            }
            accepted = candidate;
            end += 1;
        }

        segments.push(accepted);
        start = end;
    }

    debug!(
        start = range.start,
        end = range.end,
        segments = segments.len(),
        "sliding-window segmentation complete"
    );
    Ok(segments)
}
