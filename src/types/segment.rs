use crate::error::{Result, SegmentationError};
use crate::types::SeqRange;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Straight line from `(x0, y0)` to `(x1, y1)`, with `x0 < x1`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub x0: usize,
    pub y0: f64,
    pub x1: usize,
    pub y1: f64,
}

impl Segment {
    pub fn new(x0: usize, y0: f64, x1: usize, y1: f64) -> Self {
        debug_assert!(x0 < x1, "segment must span at least two samples");
        Self { x0, y0, x1, y1 }
    }

    /// Endpoints as `(x0, y0, x1, y1)`
    pub fn points(&self) -> (usize, f64, usize, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    pub fn range(&self) -> SeqRange {
        SeqRange {
            start: self.x0,
            end: self.x1,
        }
    }

    /// Index distance between the endpoints
    pub fn span(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn rise(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Rise over span, the segment "ratio" used by the feature helpers
    pub fn slope(&self) -> f64 {
        self.rise() / self.span() as f64
    }

    /// Evaluate the line at index `x` (extrapolates outside the span)
    pub fn value_at(&self, x: usize) -> f64 {
        self.y0 + self.slope() * (x as f64 - self.x0 as f64)
    }
}

impl From<Segment> for (usize, f64, usize, f64) {
    fn from(segment: Segment) -> Self {
        segment.points()
    }
}

/// Check that `segments` cover `range` exactly, in order, without gaps or overlaps.
///
/// Adjacent segments share their boundary index: `segments[i].x1 == segments[i + 1].x0`.
pub fn check_contiguous(segments: &[Segment], range: SeqRange) -> Result<()> {
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(SegmentationError::Discontiguous(
                "empty segment list".to_string(),
            ))
        }
    };

    if first.x0 != range.start {
        return Err(SegmentationError::Discontiguous(format!(
            "first segment starts at {} instead of {}",
            first.x0, range.start
        )));
    }
    if last.x1 != range.end {
        return Err(SegmentationError::Discontiguous(format!(
            "last segment ends at {} instead of {}",
            last.x1, range.end
        )));
    }

    for (i, segment) in segments.iter().enumerate() {
        if segment.x0 >= segment.x1 {
            return Err(SegmentationError::Discontiguous(format!(
                "segment {} has x0={} >= x1={}",
                i, segment.x0, segment.x1
            )));
        }
    }

    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0].x1 != pair[1].x0 {
            return Err(SegmentationError::Discontiguous(format!(
                "segment {} ends at {} but segment {} starts at {}",
                i,
                pair[0].x1,
                i + 1,
                pair[1].x0
            )));
        }
    }

    Ok(())
}
