use crate::error::{Result, SegmentationError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive index range `[start, end]` into a [`Sequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeqRange {
    pub start: usize,
    pub end: usize,
}

impl SeqRange {
    /// Build a range, requiring `start < end`
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start >= end {
            return Err(SegmentationError::InvalidRange {
                start,
                end,
                len: end.saturating_add(1),
            });
        }
        Ok(Self { start, end })
    }

    /// Number of samples covered, both endpoints included
    pub fn point_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Read-only view over a finite signal of at least two samples.
///
/// Indices are sample positions. Mapping them back to timestamps or
/// log rows is left to the caller.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<'a> {
    values: &'a [f64],
}

impl<'a> Sequence<'a> {
    pub fn new(values: &'a [f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(SegmentationError::SequenceTooShort(values.len()));
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SegmentationError::NonFiniteValue { index });
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, a sequence holds at least two samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Samples of an already validated range
    pub fn slice(&self, range: SeqRange) -> &'a [f64] {
        &self.values[range.start..=range.end]
    }

    pub fn full_range(&self) -> SeqRange {
        SeqRange {
            start: 0,
            end: self.values.len() - 1,
        }
    }

    /// Ensure `range` addresses valid indices of this sequence
    pub fn check_range(&self, range: SeqRange) -> Result<SeqRange> {
        if range.start >= range.end || range.end >= self.values.len() {
            return Err(SegmentationError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.values.len(),
            });
        }
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_rejects_short_input() {
        assert_eq!(
            Sequence::new(&[]).unwrap_err(),
            SegmentationError::SequenceTooShort(0)
        );
        assert_eq!(
            Sequence::new(&[1.0]).unwrap_err(),
            SegmentationError::SequenceTooShort(1)
        );
    }

    #[test]
    fn test_sequence_rejects_non_finite() {
        let data = [1.0, 2.0, f64::NAN, 4.0];
        assert_eq!(
            Sequence::new(&data).unwrap_err(),
            SegmentationError::NonFiniteValue { index: 2 }
        );
        let data = [f64::INFINITY, 2.0];
        assert!(Sequence::new(&data).is_err());
    }

    #[test]
    fn test_range_checks() {
        let data = [0.0, 1.0, 2.0, 3.0];
        let seq = Sequence::new(&data).unwrap();
        assert_eq!(seq.full_range(), SeqRange { start: 0, end: 3 });
        assert!(seq.check_range(SeqRange { start: 1, end: 3 }).is_ok());
        assert!(seq.check_range(SeqRange { start: 1, end: 4 }).is_err());
        assert!(seq.check_range(SeqRange { start: 2, end: 2 }).is_err());
        assert!(SeqRange::new(3, 1).is_err());
    }

    #[test]
    fn test_slice_is_inclusive() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0];
        let seq = Sequence::new(&data).unwrap();
        let range = SeqRange::new(1, 3).unwrap();
        assert_eq!(seq.slice(range), &[1.0, 2.0, 3.0]);
        assert_eq!(range.point_count(), 3);
        assert!(range.contains(3));
        assert!(!range.contains(4));
    }
}
