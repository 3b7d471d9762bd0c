//! Bottom-up merge segmentation
//!
//! Starts from the finest partition (one segment per adjacent sample pair)
//! and repeatedly applies the cheapest merge of two neighbouring segments
//! while its cost stays below `max_error`.

use crate::algorithms::Scorer;
use crate::error::{Result, SegmentationError};
use crate::types::{Segment, SeqRange};
use tracing::{debug, trace};

/// Candidate merge of `segments[i]` and `segments[i + 1]`
#[derive(Debug, Clone, Copy)]
struct MergeCandidate {
    merged: Segment,
    cost: f64,
}

fn merge_candidate(scorer: &Scorer<'_>, left: &Segment, right: &Segment) -> Result<MergeCandidate> {
    let (merged, cost) = scorer.score(left.x0, right.x1);
    if !cost.is_finite() {
        return Err(SegmentationError::Degenerate(format!(
            "non-finite merge cost over [{}, {}]: {}",
            left.x0, right.x1, cost
        )));
    }
    Ok(MergeCandidate { merged, cost })
}

/// Index of the cheapest merge; the first one wins ties
fn cheapest(candidates: &[MergeCandidate]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        match best {
            Some((_, cost)) if candidate.cost >= cost => {}
            _ => best = Some((idx, candidate.cost)),
        }
    }
    best
}

/// Segment `range` by bottom-up merging.
///
/// The run is all-or-nothing: a range that admits no merge at all (two
/// samples) or a non-finite merge cost fails the whole call with
/// [`SegmentationError::Degenerate`].
pub fn bottom_up(scorer: &Scorer<'_>, range: SeqRange, max_error: f64) -> Result<Vec<Segment>> {
    let range = scorer.sequence().check_range(range)?;

    let mut segments: Vec<Segment> = (range.start..range.end)
        .map(|x| scorer.fit(x, x + 1))
        .collect();

    if segments.len() < 2 {
        return Err(SegmentationError::Degenerate(format!(
            "range [{}, {}] has no adjacent segments to merge",
            range.start, range.end
        )));
    }

    let mut candidates = segments
        .windows(2)
        .map(|pair| merge_candidate(scorer, &pair[0], &pair[1]))
        .collect::<Result<Vec<_>>>()?;

    let mut merges = 0usize;
    while let Some((idx, cost)) = cheapest(&candidates) {
        if cost >= max_error {
            break;
        }

        trace!(
            x0 = candidates[idx].merged.x0,
            x1 = candidates[idx].merged.x1,
            cost,
            "merging segments"
        );
        segments[idx] = candidates[idx].merged;
        segments.remove(idx + 1);
        candidates.remove(idx);
        merges += 1;

        // candidates[idx - 1] now pairs segments[idx - 1] with the merged segment,
        // candidates[idx] pairs the merged segment with its right neighbour
        if idx > 0 {
            candidates[idx - 1] = merge_candidate(scorer, &segments[idx - 1], &segments[idx])?;
        }
        if idx < candidates.len() {
            candidates[idx] = merge_candidate(scorer, &segments[idx], &segments[idx + 1])?;
        }
    }

    debug!(
        start = range.start,
        end = range.end,
        merges,
        segments = segments.len(),
        "bottom-up segmentation complete"
    );
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::FitMethod;
    use crate::metric::ErrorMethod;
    use crate::types::{check_contiguous, Sequence};

    fn scorer(values: &[f64]) -> Scorer<'_> {
        Scorer::new(
            Sequence::new(values).unwrap(),
            FitMethod::Regression,
            ErrorMethod::SumSquaredResiduals,
        )
    }

    #[test]
    fn test_two_point_range_is_degenerate() {
        let values = [1.0, 2.0];
        let scorer = scorer(&values);
        let err = bottom_up(&scorer, SeqRange { start: 0, end: 1 }, 10.0).unwrap_err();
        assert!(matches!(err, SegmentationError::Degenerate(_)));
    }

    #[test]
    fn test_linear_signal_merges_completely() {
        let values: Vec<f64> = (0..12).map(|x| 0.5 * x as f64 - 2.0).collect();
        let scorer = scorer(&values);
        let segments = bottom_up(&scorer, SeqRange { start: 0, end: 11 }, 1e-6).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!((segments[0].x0, segments[0].x1), (0, 11));
    }

    #[test]
    fn test_zero_budget_keeps_finest_partition() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        let scorer = scorer(&values);
        let segments = bottom_up(&scorer, SeqRange { start: 0, end: 4 }, 0.0).unwrap();
        assert_eq!(segments.len(), 4);
        check_contiguous(&segments, SeqRange { start: 0, end: 4 }).unwrap();
    }

    #[test]
    fn test_two_ramps_stay_separate() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0];
        let scorer = scorer(&values);
        let segments = bottom_up(&scorer, SeqRange { start: 0, end: 8 }, 0.5).unwrap();
        assert_eq!(
            segments.iter().map(|s| (s.x0, s.x1)).collect::<Vec<_>>(),
            vec![(0, 4), (4, 8)]
        );
    }

    #[test]
    fn test_respects_sub_range() {
        let values = [50.0, 0.0, 1.0, 2.0, 3.0, -50.0];
        let scorer = scorer(&values);
        let range = SeqRange { start: 1, end: 4 };
        let segments = bottom_up(&scorer, range, 0.5).unwrap();
        assert_eq!(segments.len(), 1);
        check_contiguous(&segments, range).unwrap();
    }
}
