use crate::types::Segment;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named flight-log signal, one value per log row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signal {
    pub name: String,
    pub values: Vec<f64>,
}

impl Signal {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Segmentation result for one signal
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentedSignal {
    pub name: String,
    pub samples: usize,
    pub segments: Vec<Segment>,
}

impl SegmentedSignal {
    /// Mean number of samples per segment
    pub fn compression(&self) -> f64 {
        if self.segments.is_empty() {
            return 0.0;
        }
        self.samples as f64 / self.segments.len() as f64
    }
}
