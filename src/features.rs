//! Per-sample features derived from a segment list
//!
//! Downstream failure and causality analysis works on series aligned with the
//! raw signal, so most helpers here "paint" a per-segment statistic over the
//! indices the segment covers.
//!
//! # Fill rule
//!
//! Each segment owns the indices `[x0, x1)`. Indices no segment owns keep
//! the raw series value; this includes the closing index `x1` of the last
//! segment.

use crate::types::Segment;

/// Direction of an [`event_finder`] threshold test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Lesser,
}

/// Undo the 0/360 degree wraparound of a heading trace.
///
/// A drop of more than 300 degrees between consecutive samples counts as a
/// wrap forward and adds 360 to every later sample; a rise of more than 300
/// subtracts 360. The first sample is never shifted.
pub fn unwrap_yaw(series: &[f64]) -> Vec<f64> {
    let mut turns = 0i64;
    let mut out = Vec::with_capacity(series.len());
    for (i, &value) in series.iter().enumerate() {
        if i > 0 {
            let drop = series[i - 1] - value;
            if drop > 300.0 {
                turns += 1;
            } else if drop < -300.0 {
                turns -= 1;
            }
        }
        out.push(value + 360.0 * turns as f64);
    }
    out
}

/// Slope of every segment, in order
pub fn segment_slopes(segments: &[Segment]) -> Vec<f64> {
    segments.iter().map(Segment::slope).collect()
}

fn paint<F>(series: &[f64], segments: &[Segment], mut value_for: F) -> Vec<f64>
where
    F: FnMut(usize, &Segment) -> f64,
{
    let mut out = series.to_vec();
    let len = out.len();
    for (i, segment) in segments.iter().enumerate() {
        let start = segment.x0.min(len);
        let end = segment.x1.min(len);
        if start >= end {
            continue;
        }
        let value = value_for(i, segment);
        out[start..end].iter_mut().for_each(|v| *v = value);
    }
    out
}

/// Series where each index carries the slope of its segment
pub fn segment_ratio_series(series: &[f64], segments: &[Segment]) -> Vec<f64> {
    paint(series, segments, |_, s| s.slope())
}

/// Series where each index carries the mean of the raw samples in `[x0, x1)`
pub fn segment_mean_series(series: &[f64], segments: &[Segment]) -> Vec<f64> {
    paint(series, segments, |_, s| mean(window(series, s)))
}

/// Series where each index carries the median of the raw samples in `[x0, x1)`
pub fn segment_median_series(series: &[f64], segments: &[Segment]) -> Vec<f64> {
    paint(series, segments, |_, s| median(window(series, s)))
}

/// Series where each segment carries the slope of the segment before it.
///
/// The first segment has no predecessor and is filled with 0.0.
pub fn lagged_segment_series(series: &[f64], segments: &[Segment]) -> Vec<f64> {
    paint(series, segments, |i, _| {
        if i == 0 {
            0.0
        } else {
            segments[i - 1].slope()
        }
    })
}

fn window<'a>(series: &'a [f64], segment: &Segment) -> &'a [f64] {
    let end = segment.x1.min(series.len());
    let start = segment.x0.min(end);
    &series[start..end]
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Percentile rank of every value in `(0, 1]`; ties share their average rank
pub fn percentile_rank(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // 1-based positions i+1 ..= j+1
        let average = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = average / n as f64;
        }
        i = j + 1;
    }
    ranks
}

/// Trailing moving average; the first `window - 1` points average what is available
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(series.len());
    let mut sum = 0.0;
    for (i, &value) in series.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= series[i - window];
        }
        out.push(sum / (i + 1).min(window) as f64);
    }
    out
}

/// Flag samples strictly above (or below) `threshold`
pub fn event_finder(values: &[f64], threshold: f64, comparison: Comparison) -> Vec<bool> {
    values
        .iter()
        .map(|&v| match comparison {
            Comparison::Greater => v > threshold,
            Comparison::Lesser => v < threshold,
        })
        .collect()
}

/// `q`-th percentile (0..=100) with linear interpolation between ranks
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !q.is_finite() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Rise of every segment and a flag for segments standing out.
///
/// With `q > 0` a segment is flagged when its rise exceeds the `q`-th
/// percentile of all rises. With `q <= 0` any non-zero rise is
/// flagged, which suits step-like signals such as flight modes.
pub fn threshold_segments(segments: &[Segment], q: f64) -> (Vec<f64>, Vec<bool>) {
    let rises: Vec<f64> = segments.iter().map(Segment::rise).collect();
    let targets = if q > 0.0 {
        match percentile(&rises, q) {
            Some(limit) => event_finder(&rises, limit, Comparison::Greater),
            None => Vec::new(),
        }
    } else {
        rises.iter().map(|&r| r != 0.0).collect()
    };
    (rises, targets)
}

/// Slopes of all segments and the index of the steepest one
pub fn max_slope(segments: &[Segment]) -> Option<(Vec<f64>, usize)> {
    let slopes = segment_slopes(segments);
    let idx = slopes
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)?;
    Some((slopes, idx))
}
