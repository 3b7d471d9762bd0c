//! Flight Segment Library
//!
//! Piecewise-linear segmentation of drone flight-log signals. A noisy signal
//! is reduced to an ordered, contiguous list of straight-line segments whose
//! fit error stays within a tolerance budget, and per-sample features are
//! derived from that list for failure and causality analysis.
//!
//! # Features
//!
//! - **`csv`** (default): Load signals from CSV logs and export segment lists to CSV
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Export segment lists in JSON format
//! - **`serde`**: Enable serialization/deserialization of types and options
//!
//! # Quick Start
//!
//! ```rust
//! use flight_segment::{segment, Algorithm, FitMethod, SegmentationOptions};
//!
//! let yaw = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 100.0, 101.0, 102.0, 103.0];
//! let options = SegmentationOptions::new(Algorithm::TopDown, 1.0)
//!     .with_fit_method(FitMethod::Regression)
//!     .with_error_growth(0.5);
//!
//! let segments = segment(&yaw, &options).unwrap();
//! assert_eq!(segments.first().unwrap().x0, 0);
//! assert_eq!(segments.last().unwrap().x1, 9);
//! ```
//!
//! Unsupported method names are reported as errors rather than panics:
//! ```rust
//! use flight_segment::{Segmenter, SegmentationError};
//!
//! let err = Segmenter::from_names("td", "bogus", "ssr", 1.0).unwrap_err();
//! assert_eq!(err, SegmentationError::UnsupportedFitMethod("bogus".into()));
//! ```
//!
//! # Public API
//!
//! ## Segmentation
//! - [`Segmenter`] - Validated configuration reusable across signals
//! - [`segment`] - One-shot segmentation with [`SegmentationOptions`]
//! - [`Algorithm`] - Sliding-window, bottom-up or top-down
//! - [`FitMethod`] - Regression or interpolation endpoints
//! - [`ErrorMethod`] - Sum of squared residuals or `1 - R²`
//!
//! ## Data Types
//! - [`Segment`] - Line from `(x0, y0)` to `(x1, y1)`
//! - [`Sequence`] - Validated read-only view over the samples
//! - [`Signal`] / [`SegmentedSignal`] - Named signals and their segment lists
//!
//! ## Features
//! - [`segment_ratio_series`], [`segment_mean_series`], [`segment_median_series`]
//! - [`lagged_segment_series`], [`percentile_rank`], [`moving_average`]
//! - [`event_finder`], [`threshold_segments`], [`max_slope`], [`unwrap_yaw`]

// Module declarations
pub mod algorithms;
pub mod error;
pub mod export;
pub mod features;
pub mod fit;
pub mod metric;
pub mod regression;
pub mod segmentation;
pub mod types;

pub use error::{Result, SegmentationError};
pub use export::*;
pub use features::*;
pub use fit::FitMethod;
pub use metric::ErrorMethod;
pub use regression::{least_squares_line_fit, LineFit};
pub use segmentation::*;
pub use types::*;
