// ================================================================================
// SNR, sweep and impulse analyses
// File: tests/analysis_tests.rs
// ================================================================================

use adaptive_lab::*;

#[cfg(test)]
mod tests {
    use super::*;
    use adaptive_lab::config::{AnalysisConfig, SweepSignal, SynthesisConfig};

    fn engine_with_seed(seed: u64) -> AnalysisEngine {
        let synthesis = SynthesisConfig {
            seed: Some(seed),
            ..SynthesisConfig::default()
        };
        AnalysisEngine::new(AnalysisConfig::default(), synthesis)
    }

    #[test]
    fn test_normalized_snr_of_identical_signals() {
        let engine = AnalysisEngine::default();
        let signal: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.02).sin() + 0.1).collect();

        for splits in [1, 2, 4, 5, 8, 10] {
            let report = engine.normalized_snr(&signal, &signal, splits).unwrap();
            assert_eq!(report.len(), splits);
            assert!(report.values().iter().all(|v| v.is_infinite()));
        }
    }

    #[test]
    fn test_normalized_snr_scale_invariance() {
        let engine = AnalysisEngine::default();
        let clean: Vec<f64> = (0..100).map(|i| (i as f64 * 0.1).sin()).collect();
        let noised: Vec<f64> = clean.iter().enumerate().map(|(i, c)| c + 0.05 * (i % 3) as f64).collect();
        let scaled: Vec<f64> = noised.iter().map(|v| v * 10.0).collect();

        let a = engine.normalized_snr(&clean, &noised, 1).unwrap().values();
        let b = engine.normalized_snr(&clean, &scaled, 1).unwrap().values();
        assert!((a[0] - b[0]).abs() < 1e-9 * a[0].abs().max(1.0));
    }

    #[test]
    fn test_sweep_frequencies_match_configuration() {
        let engine = AnalysisEngine::default();
        let frequencies = engine.sweep_frequencies();
        assert_eq!(frequencies.len(), 125);
        assert_eq!(frequencies[1], 0.201);
        assert!(frequencies.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_sweep_on_empty_filter() {
        let engine = engine_with_seed(3);
        let amplitudes = engine.amplitude_frequency_characteristic(&AdaptiveFilter::default());
        assert_eq!(amplitudes.len(), 125);
        // only the bootstrap sample survives
        assert!(amplitudes.iter().all(|&a| a >= 0.0 && a <= 2.0 / (1000.0_f64).sqrt()));
    }

    #[test]
    fn test_sweep_noise_depends_on_seed() {
        let mut filter = AdaptiveFilter::default();
        filter.load_weights(vec![Weight::new(1.0)], vec![]);

        let a = engine_with_seed(1).amplitude_frequency_characteristic(&filter);
        let b = engine_with_seed(1).amplitude_frequency_characteristic(&filter);
        let c = engine_with_seed(2).amplitude_frequency_characteristic(&filter);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clean_sweep_ignores_seed() {
        let config = AnalysisConfig {
            sweep_signal: SweepSignal::Clean,
            ..AnalysisConfig::default()
        };
        let mut filter = AdaptiveFilter::default();
        filter.load_weights(vec![Weight::new(0.5)], vec![Weight::new(0.25)]);

        let run = |seed| {
            let synthesis = SynthesisConfig {
                seed: Some(seed),
                ..SynthesisConfig::default()
            };
            AnalysisEngine::new(config.clone(), synthesis).amplitude_frequency_characteristic(&filter)
        };
        assert_eq!(run(1), run(2));
    }

    #[test]
    fn test_impulse_response_of_second_order_filter() {
        let engine = AnalysisEngine::default();
        let mut filter = FixedOrderFilter::second_order();
        let (response, impulse) = engine.impulse_response(&mut filter);

        assert_eq!(response.len(), 50);
        assert_eq!(impulse.iter().sum::<f64>(), 1.0);
        assert_eq!(&response[..2], &[1.0, 0.0]);
        // (0 + 0 + 1) / 3
        assert!((response[2] - 1.0 / 3.0).abs() < 1e-12);
    }
}
