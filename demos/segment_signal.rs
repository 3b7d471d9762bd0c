//! Segment a synthetic yaw trace with each algorithm and print the derived features.
//!
//! Run with: `cargo run --example segment_signal`

use flight_segment::{
    max_slope, percentile_rank, segment_ratio_series, threshold_segments, Algorithm, ErrorMethod,
    FitMethod, Result, SegmentationOptions, Segmenter,
};

fn synthetic_yaw() -> Vec<f64> {
    // Hover, a sharp yaw command, then a slow drift back
    (0..60)
        .map(|i| {
            let t = i as f64;
            let base = match i {
                0..=19 => 0.0,
                20..=24 => (t - 19.0) * 18.0,
                _ => 90.0 - (t - 24.0) * 0.5,
            };
            base + (t * 1.7).sin() * 0.3
        })
        .collect()
}

fn main() -> Result<()> {
    let yaw = synthetic_yaw();

    for algorithm in [
        Algorithm::SlidingWindow,
        Algorithm::BottomUp,
        Algorithm::TopDown,
    ] {
        let options = SegmentationOptions::new(algorithm, 5.0)
            .with_fit_method(FitMethod::Regression)
            .with_error_method(ErrorMethod::SumSquaredResiduals)
            .with_error_growth(0.25);
        let segments = Segmenter::new(options)?.segment(&yaw)?;

        println!("{algorithm}: {} segments", segments.len());
        for s in &segments {
            println!(
                "  [{:>3}, {:>3}]  {:>8.2} -> {:>8.2}  slope {:>7.2}",
                s.x0,
                s.x1,
                s.y0,
                s.y1,
                s.slope()
            );
        }

        if let Some((_, steepest)) = max_slope(&segments) {
            println!("  steepest segment: #{steepest}");
        }
        let (_, flagged) = threshold_segments(&segments, 90.0);
        println!(
            "  segments above 90th percentile rise: {}",
            flagged.iter().filter(|&&f| f).count()
        );

        let ratios = segment_ratio_series(&yaw, &segments);
        let ranks = percentile_rank(&ratios);
        let peak = ranks.iter().cloned().fold(0.0, f64::max);
        println!("  top ratio rank: {peak:.2}");
        println!();
    }

    Ok(())
}
