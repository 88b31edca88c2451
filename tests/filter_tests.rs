// ================================================================================
// Filter behaviour across the public API
// File: tests/filter_tests.rs
// ================================================================================

use adaptive_lab::*;

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_lab::utils::{mean_squared_error, RandomSource};

    fn seeded_builder(seed: u64) -> FilterBuilder {
        FilterBuilder::with_random_source(RandomSource::from_seed(seed))
    }

    #[test]
    fn test_zero_weight_filter_predicts_bootstrap_then_zero() {
        let mut builder = seeded_builder(1);
        let mut filter = builder.default_filter();
        builder.add_weight(&mut filter, TapRole::In, Some(0.0));
        builder.add_weight(&mut filter, TapRole::Out, Some(0.0));

        let signal: Vec<f64> = (0..20).map(|i| (i as f64 * 0.3).sin() + 2.0).collect();
        let predicted = filter.predict(&signal);

        assert_eq!(predicted.len(), signal.len());
        assert_eq!(predicted[0], signal[0]);
        assert!(predicted[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_random_initial_weights_are_unit_interval_and_seeded() {
        let draw = |seed| {
            let mut builder = seeded_builder(seed);
            let mut filter = builder.default_filter();
            for _ in 0..8 {
                builder.add_weight(&mut filter, TapRole::In, None);
            }
            filter.weights(TapRole::In)
        };

        let a = draw(5);
        assert!(a.iter().all(|w| (0.0..1.0).contains(&w.value) && w.enabled));
        assert_eq!(a, draw(5));
        assert_ne!(a, draw(6));
    }

    #[test]
    fn test_remove_and_toggle_out_of_range() {
        let mut builder = seeded_builder(2);
        let mut filter = builder.default_filter();
        builder.add_weight(&mut filter, TapRole::In, Some(0.1));

        match builder.remove_weight(&mut filter, 3, TapRole::In) {
            Err(LabError::OutOfRange { role, index, len, .. }) => {
                assert_eq!((role, index, len), (TapRole::In, 3, 1));
            }
            other => panic!("expected out of range, got {:?}", other),
        }
        assert!(matches!(
            builder.toggle_weight_enabled(&mut filter, 0, TapRole::Out),
            Err(LabError::OutOfRange { role: TapRole::Out, len: 0, .. })
        ));
        assert_eq!(filter.group(TapRole::In).len(), 1);
    }

    #[test]
    fn test_director_topologies() {
        let mut director = FilterDirector::new(seeded_builder(3));
        let first = director.first_degree_filter();
        let second = director.second_degree_filter();

        assert_eq!(first.info(), "This filter has 1 input weights and 1 output weights.");
        assert_eq!(second.info(), "This filter has 1 input weights and 2 output weights.");
        assert_eq!(second.group(TapRole::Out).samples(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_fixed_order_last_epoch_mse_within_quarter_of_first_on_noiseless_sine() {
        let mut synthesizer = SignalSynthesizer::seeded(1);
        let clean = synthesizer.sine(1.0).clean;
        let mut filter = FixedOrderFilter::first_order();

        let mut errors = Vec::new();
        for _ in 0..50 {
            let filtered = filter.train(&clean, &clean).unwrap();
            errors.push(mean_squared_error(&filtered, &clean));
        }

        let first = errors[0];
        let last = errors[49];
        assert!(last.is_finite());
        assert!(
            last <= first * 1.25,
            "last epoch MSE {} exceeds 1.25x first epoch MSE {}",
            last,
            first
        );
    }

    #[test]
    fn test_fixed_order_filters_keep_output_length() {
        let noised: Vec<f64> = (0..11).map(|i| i as f64).collect();
        for order in [FilterOrder::First, FilterOrder::Second] {
            let mut filter = FixedOrderFilter::new(order);
            assert_eq!(filter.predict(&noised).len(), noised.len());
            assert_eq!(filter.train(&noised, &noised).unwrap().len(), noised.len());
            assert_eq!(filter.weights().len(), order.input_len());
        }
    }

    #[test]
    fn test_schedule_from_config() {
        let config = config::FilterConfig {
            learning_rate: 0.1,
            seed: Some(4),
            schedule: LearningRateSchedule::PersistentDecay { factor: 0.5 },
        };
        let mut filter = AdaptiveFilter::from_config(&config);
        filter.load_weights(vec![Weight::new(0.0)], vec![]);
        filter.train(&[0.0; 4], &[0.0; 4]).unwrap();
        assert!((filter.current_learning_rate() - 0.0125).abs() < 1e-12);
        assert_eq!(filter.learning_rate(), 0.1);
    }

    #[test]
    fn test_filters_share_the_signal_filter_surface() {
        fn run<F: SignalFilter>(filter: &mut F, signal: &[f64]) -> usize {
            filter.predict(signal).len()
        }
        let signal = [1.0, 0.5, 0.25];
        assert_eq!(run(&mut FixedOrderFilter::second_order(), &signal), 3);
        assert_eq!(run(&mut AdaptiveFilter::default(), &signal), 3);
    }
}
