#[cfg(test)]
mod tests {
    use crate::indicators::*;
    use crate::moving_average::*;
    use analysis_core::{AnalysisError, PricePoint, PriceSeries};
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    // Helper function to wrap closes in a daily series
    fn series_from(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2023, 1, 2, 21, 0, 0).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(start + Duration::days(i as i64), close))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    fn trending_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.1).collect()
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 0.001); // (1+2+3)/3 = 2
        assert!((result[1] - 3.0).abs() < 0.001); // (2+3+4)/3 = 3
        assert!((result[2] - 4.0).abs() < 0.001); // (3+4+5)/3 = 4
    }

    #[test]
    fn test_sma_insufficient_data() {
        let data = vec![1.0, 2.0];
        let result = sma(&data, 5);

        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_sma_real_prices() {
        let prices = sample_prices();
        let result = sma(&prices, 5);

        assert!(!result.is_empty());
        // First SMA(5) should be average of first 5 prices
        let expected_first = (44.34 + 44.09 + 44.15 + 43.61 + 44.33) / 5.0;
        assert!((result[0] - expected_first).abs() < 0.01);
    }

    #[test]
    fn test_sma_aligned_warmup_is_none() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma_aligned(&data, 3);

        assert_eq!(result.len(), 5);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_relative_eq!(result[2].unwrap(), 2.0);
        assert_relative_eq!(result[3].unwrap(), 3.0);
        assert_relative_eq!(result[4].unwrap(), 4.0);
    }

    #[test]
    fn test_sma_aligned_matches_window_mean() {
        let prices = sample_prices();
        for window in [1, 2, 5, 7, 20] {
            let result = sma_aligned(&prices, window);
            assert_eq!(result.len(), prices.len());
            for (i, value) in result.iter().enumerate() {
                if i + 1 < window {
                    assert!(value.is_none(), "window {} index {} should be undefined", window, i);
                } else {
                    let slice = &prices[i + 1 - window..=i];
                    let expected = slice.iter().sum::<f64>() / window as f64;
                    assert_relative_eq!(value.unwrap(), expected, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_sma_aligned_window_longer_than_data() {
        let prices = sample_prices();
        let result = sma_aligned(&prices, 21);

        assert_eq!(result.len(), prices.len());
        assert!(result.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_sma_aligned_window_equal_to_data() {
        let data = vec![2.0, 4.0, 6.0];
        let result = sma_aligned(&data, 3);

        assert_eq!(result, vec![None, None, Some(4.0)]);
    }

    #[test]
    fn test_sma_aligned_window_one_is_identity() {
        let prices = sample_prices();
        let result = sma_aligned(&prices, 1);
        let expected: Vec<Option<f64>> = prices.iter().copied().map(Some).collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_engine_default_windows() {
        let engine = MovingAverageEngine::default();
        assert_eq!(engine.windows(), &[7, 28, 50, 100, 200]);
    }

    #[test]
    fn test_engine_year_of_prices() {
        let closes = trending_closes(252);
        let prices = series_from(&closes);
        let results = MovingAverageEngine::default().compute(&prices);

        assert_eq!(results.len(), 5);
        for series in &results {
            assert_eq!(series.len(), 252);
            assert_eq!(series.defined_count(), 252 - series.window() + 1);
            assert!(series.get(series.window() - 2).is_none());
            assert!(series.get(series.window() - 1).is_some());
        }

        let ma200 = &results[4];
        assert_eq!(ma200.window(), 200);
        let expected_latest = closes[52..].iter().sum::<f64>() / 200.0;
        assert_relative_eq!(ma200.latest().unwrap(), expected_latest, epsilon = 1e-9);
    }

    #[test]
    fn test_engine_short_series_leaves_long_windows_undefined() {
        let prices = series_from(&sample_prices());
        let results = MovingAverageEngine::default().compute(&prices);

        let ma7 = &results[0];
        assert_eq!(ma7.defined_count(), 14);
        for series in &results[1..] {
            assert_eq!(series.len(), 20);
            assert_eq!(series.defined_count(), 0);
            assert!(series.latest().is_none());
        }
    }

    #[test]
    fn test_engine_preserves_requested_order() {
        let prices = series_from(&trending_closes(60));
        let engine = MovingAverageEngine::new([50, 7, 28]).unwrap();
        let windows: Vec<usize> = engine.compute(&prices).iter().map(|s| s.window()).collect();

        assert_eq!(windows, vec![50, 7, 28]);
    }

    #[test]
    fn test_engine_windows_are_independent() {
        let prices = series_from(&trending_closes(120));
        let alone = MovingAverageEngine::new([50]).unwrap().compute(&prices);
        let together = MovingAverageEngine::new([7, 50, 100]).unwrap().compute(&prices);

        assert_eq!(alone[0], together[1]);
    }

    #[test]
    fn test_engine_recompute_is_bit_identical() {
        let prices = series_from(&trending_closes(300));
        let engine = MovingAverageEngine::default();
        let first = engine.compute(&prices);
        let second = engine.compute(&prices);

        for (a, b) in first.iter().zip(&second) {
            let bits_a: Vec<Option<u64>> = a.values().iter().map(|v| v.map(f64::to_bits)).collect();
            let bits_b: Vec<Option<u64>> = b.values().iter().map(|v| v.map(f64::to_bits)).collect();
            assert_eq!(bits_a, bits_b);
        }
    }

    #[test]
    fn test_engine_deduplicates_windows() {
        let engine = MovingAverageEngine::new([7, 50, 7, 200, 50]).unwrap();
        assert_eq!(engine.windows(), &[7, 50, 200]);
    }

    #[test]
    fn test_engine_rejects_zero_window() {
        let err = MovingAverageEngine::new([7, 0]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));

        let prices = series_from(&sample_prices());
        let err = MovingAverageEngine::compute_window(&prices, 0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }

    #[test]
    fn test_engine_empty_series() {
        let prices = PriceSeries::new(vec![]).unwrap();
        let results = MovingAverageEngine::default().compute(&prices);

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_compute_window_matches_engine() {
        let prices = series_from(&trending_closes(80));
        let single = MovingAverageEngine::compute_window(&prices, 28).unwrap();
        let engine = MovingAverageEngine::new([28]).unwrap().compute(&prices);

        assert_eq!(single, engine[0]);
    }

    #[test]
    fn test_chart_points_drop_warmup() {
        let closes = sample_prices();
        let prices = series_from(&closes);
        let ma = MovingAverageEngine::compute_window(&prices, 5).unwrap();
        let points = ma.chart_points(&prices);

        assert_eq!(points.len(), 16);
        assert_eq!(points[0].timestamp, prices.points()[4].timestamp);
        assert_eq!(points[0].close, closes[4]);
        assert_relative_eq!(points[0].average, closes[..5].iter().sum::<f64>() / 5.0);
    }

    #[test]
    fn test_sma_huge_closes_do_not_overflow() {
        let result = sma_aligned(&[1.0e308, 1.0e308, 1.0e308], 2);

        assert_eq!(result[0], None);
        assert_relative_eq!(result[1].unwrap(), 1.0e308, max_relative = 1e-12);
        assert_relative_eq!(result[2].unwrap(), 1.0e308, max_relative = 1e-12);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MovingAverageEngine>();
        assert_send_sync::<MovingAverageSeries>();
    }

    #[test]
    fn test_series_serializes_undefined_as_null() {
        let prices = series_from(&[1.0, 2.0, 3.0]);
        let ma = MovingAverageEngine::compute_window(&prices, 2).unwrap();
        let json = serde_json::to_value(&ma).unwrap();

        assert_eq!(json["window"], 2);
        assert!(json["values"][0].is_null());
        assert_eq!(json["values"][1], 1.5);
    }
}
