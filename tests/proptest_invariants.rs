use flight_segment::{
    check_contiguous, least_squares_line_fit, segment, Algorithm, ErrorMethod, FitMethod,
    SegmentationOptions, Sequence, SeqRange,
};
use proptest::prelude::*;

fn signal_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, 3..48)
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::SlidingWindow),
        Just(Algorithm::BottomUp),
        Just(Algorithm::TopDown),
    ]
}

fn fit_strategy() -> impl Strategy<Value = FitMethod> {
    prop_oneof![Just(FitMethod::Regression), Just(FitMethod::Interpolation)]
}

fn ssr(values: &[f64], x0: usize, x1: usize) -> f64 {
    let sequence = Sequence::new(values).unwrap();
    least_squares_line_fit(&sequence, SeqRange { start: x0, end: x1 }).ssr
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn segments_tile_the_range(
        values in signal_strategy(),
        algorithm in algorithm_strategy(),
        fit in fit_strategy(),
        max_error in 0.0f64..500.0,
        error_growth in 0.0f64..1.0,
        batch_size in prop::option::of(1usize..6),
    ) {
        let mut options = SegmentationOptions::new(algorithm, max_error)
            .with_fit_method(fit)
            .with_error_growth(error_growth);
        options.batch_size = batch_size;

        let segments = segment(&values, &options).unwrap();
        let range = SeqRange { start: 0, end: values.len() - 1 };
        prop_assert!(check_contiguous(&segments, range).is_ok());
        prop_assert!(segments.iter().all(|s| s.x0 < s.x1));
    }

    #[test]
    fn segmentation_is_deterministic(
        values in signal_strategy(),
        algorithm in algorithm_strategy(),
        max_error in 0.0f64..500.0,
    ) {
        let options = SegmentationOptions::new(algorithm, max_error).with_error_growth(0.25);
        let first = segment(&values, &options).unwrap();
        let second = segment(&values, &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn segments_respect_budget_without_growth(
        values in signal_strategy(),
        algorithm in algorithm_strategy(),
        max_error in 0.0f64..500.0,
    ) {
        let options = SegmentationOptions::new(algorithm, max_error)
            .with_error_method(ErrorMethod::SumSquaredResiduals);
        let segments = segment(&values, &options).unwrap();
        for s in &segments {
            prop_assert!(ssr(&values, s.x0, s.x1) <= max_error);
        }
    }

    #[test]
    fn bottom_up_count_shrinks_with_tolerance(
        values in signal_strategy(),
        low in 0.0f64..200.0,
        extra in 0.0f64..200.0,
    ) {
        let tight = segment(&values, &SegmentationOptions::new(Algorithm::BottomUp, low)).unwrap();
        let loose =
            segment(&values, &SegmentationOptions::new(Algorithm::BottomUp, low + extra)).unwrap();
        prop_assert!(loose.len() <= tight.len());
    }

    #[test]
    fn sliding_window_ssr_count_shrinks_with_tolerance(
        values in signal_strategy(),
        fit in fit_strategy(),
        low in 0.0f64..200.0,
        extra in 0.0f64..200.0,
    ) {
        let options = |max_error| {
            SegmentationOptions::new(Algorithm::SlidingWindow, max_error)
                .with_fit_method(fit)
                .with_error_method(ErrorMethod::SumSquaredResiduals)
        };
        let tight = segment(&values, &options(low)).unwrap();
        let loose = segment(&values, &options(low + extra)).unwrap();
        prop_assert!(loose.len() <= tight.len());
    }

    #[test]
    fn top_down_count_shrinks_with_tolerance(
        values in signal_strategy(),
        use_r_squared in any::<bool>(),
        low in 0.0f64..0.5,
        extra in 0.0f64..0.5,
        error_growth in 0.0f64..1.0,
        batch_size in prop::option::of(1usize..4),
    ) {
        let error_method = if use_r_squared {
            ErrorMethod::RSquared
        } else {
            ErrorMethod::SumSquaredResiduals
        };
        let options = |max_error| {
            let mut options = SegmentationOptions::new(Algorithm::TopDown, max_error)
                .with_error_method(error_method)
                .with_error_growth(error_growth);
            options.batch_size = batch_size;
            options
        };
        let tight = segment(&values, &options(low)).unwrap();
        let loose = segment(&values, &options(low + extra)).unwrap();
        prop_assert!(loose.len() <= tight.len());
    }

    #[test]
    fn r_squared_errors_stay_in_unit_interval(
        values in signal_strategy(),
        start in 0usize..20,
        width in 1usize..20,
    ) {
        let end = (start + width).min(values.len() - 1);
        let start = start.min(end.saturating_sub(1));
        prop_assume!(start < end);
        let sequence = Sequence::new(&values).unwrap();
        let candidate = FitMethod::Regression.fit(&sequence, SeqRange { start, end });
        let error = ErrorMethod::RSquared.error(&sequence, &candidate);
        prop_assert!((0.0..=1.0).contains(&error));
    }
}
