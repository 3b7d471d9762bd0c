//! Least-squares line fitting over index ranges
//!
//! The x coordinate of every sample is its index in the sequence. Sums are
//! centered on the range means and residuals are accumulated directly, so
//! long flight-log ranges with large offsets keep their precision.

use crate::types::{SeqRange, Sequence};

/// Ordinary least-squares fit of `y = slope * x + intercept` over a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Residual sum of squares
    pub ssr: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Number of samples in the fit
    pub n: usize,
}

impl LineFit {
    /// Fitted value at index `x`
    pub fn predict(&self, x: usize) -> f64 {
        self.slope * x as f64 + self.intercept
    }
}

/// Mean that survives sums beyond `f64::MAX`; falls back to averaging the
/// offsets from the first sample, which keeps a constant range exact
fn mean(ys: &[f64]) -> f64 {
    let n = ys.len() as f64;
    let sum = ys.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / n;
    }
    let pivot = ys[0];
    pivot + ys.iter().map(|y| (y - pivot) / n).sum::<f64>()
}

/// Fit a line to `sequence[range.start..=range.end]`.
///
/// Two-point ranges have no independent residual: `ssr` is reported as
/// exactly 0.0 and `r_squared` as 1.0. A range with zero variance in y is a
/// perfect horizontal fit and also reports `r_squared = 1.0`.
pub fn least_squares_line_fit(sequence: &Sequence<'_>, range: SeqRange) -> LineFit {
    let ys = sequence.slice(range);
    let n = ys.len();

    let mean_x = range.start as f64 + (n - 1) as f64 / 2.0;
    let mean_y = mean(ys);

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for (offset, &y) in ys.iter().enumerate() {
        let dx = (range.start + offset) as f64 - mean_x;
        let dy = y - mean_y;
        ss_xx += dx * dx;
        ss_xy += dx * dy;
        ss_yy += dy * dy;
    }

    // ss_xx > 0 whenever n >= 2
    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    if n == 2 {
        return LineFit {
            slope,
            intercept,
            ssr: 0.0,
            r_squared: 1.0,
            n,
        };
    }

    let ssr = ys
        .iter()
        .enumerate()
        .map(|(offset, &y)| {
            let fitted = slope * (range.start + offset) as f64 + intercept;
            (y - fitted).powi(2)
        })
        .sum::<f64>();

    let r_squared = if ss_yy == 0.0 {
        1.0
    } else {
        ((ss_xy * ss_xy) / (ss_xx * ss_yy)).clamp(0.0, 1.0)
    };

    LineFit {
        slope,
        intercept,
        ssr,
        r_squared,
        n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(values: &[f64], start: usize, end: usize) -> LineFit {
        let seq = Sequence::new(values).unwrap();
        least_squares_line_fit(&seq, SeqRange { start, end })
    }

    #[test]
    fn test_exact_line() {
        let values: Vec<f64> = (0..10).map(|x| 2.0 * x as f64 + 1.0).collect();
        let line = fit(&values, 0, 9);
        assert_eq!(line.slope, 2.0);
        assert_eq!(line.intercept, 1.0);
        assert_eq!(line.ssr, 0.0);
        assert_eq!(line.r_squared, 1.0);
        assert_eq!(line.predict(9), 19.0);
    }

    #[test]
    fn test_sub_range_uses_absolute_indices() {
        let values: Vec<f64> = (0..10).map(|x| 3.0 * x as f64 - 4.0).collect();
        let line = fit(&values, 4, 8);
        assert!((line.slope - 3.0).abs() < 1e-12);
        assert!((line.intercept + 4.0).abs() < 1e-12);
        assert_eq!(line.n, 5);
    }

    #[test]
    fn test_residuals_of_noisy_range() {
        // y = [0, 2, 1] at x = [0, 1, 2]: slope 0.5, intercept 0.5
        let line = fit(&[0.0, 2.0, 1.0], 0, 2);
        assert!((line.slope - 0.5).abs() < 1e-12);
        assert!((line.intercept - 0.5).abs() < 1e-12);
        // residuals -0.5, 1.0, -0.5
        assert!((line.ssr - 1.5).abs() < 1e-12);
        assert!((line.r_squared - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_two_points_have_no_residual() {
        let line = fit(&[5.0, -3.0], 0, 1);
        assert_eq!(line.ssr, 0.0);
        assert_eq!(line.r_squared, 1.0);
        assert_eq!(line.slope, -8.0);
    }

    #[test]
    fn test_flat_range_is_perfect_fit() {
        let line = fit(&[4.0, 4.0, 4.0, 4.0], 0, 3);
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.ssr, 0.0);
        assert_eq!(line.r_squared, 1.0);
    }

    #[test]
    fn test_near_max_values_stay_finite() {
        // The plain sum of four 2^1023 samples overflows
        let big = 2f64.powi(1023);
        let line = fit(&[big; 4], 0, 3);
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.intercept, big);
        assert_eq!(line.ssr, 0.0);
        assert_eq!(line.predict(3), big);
    }
}
