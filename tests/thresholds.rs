use bar_dashboard::domain::alerts::{AlertStatus, AlertThresholds, ThresholdCalculator};
use bar_dashboard::domain::errors::DomainError;
use bar_dashboard::domain::market_data::{RawSeriesRow, SeriesNormalizer, SeriesTable};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn table_from_opens(opens: &[&str]) -> SeriesTable {
    let rows: Vec<RawSeriesRow> = opens
        .iter()
        .enumerate()
        .map(|(i, open)| {
            RawSeriesRow::new(format!("2024-01-{:02}", 28 - i))
                .with_field("open", *open)
                .with_field("high", "2.0")
                .with_field("low", "0.5")
                .with_field("close", "1.0")
        })
        .collect();
    SeriesNormalizer::normalize(&rows)
}

#[test]
fn single_row_gives_equal_lines() {
    let table = table_from_opens(&["1.10"]);
    let thresholds = ThresholdCalculator::default().calculate(&table).unwrap();
    assert_eq!(thresholds, AlertThresholds::new(1.10, 1.10));
}

#[test]
fn missing_open_is_excluded_from_statistics() {
    let table = table_from_opens(&["1.0", "N/A", "3.0"]);
    assert_eq!(table.len(), 3);

    let thresholds = ThresholdCalculator::default().calculate(&table).unwrap();
    assert!((thresholds.upper - 2.0).abs() < 1e-12);
    let expected_lower = 2.0 - 2f64.sqrt() / 7.0;
    assert!((thresholds.lower - expected_lower).abs() < 1e-12);
}

#[test]
fn no_valid_open_is_an_error() {
    let table = table_from_opens(&["N/A", ""]);
    assert_eq!(
        ThresholdCalculator::default().calculate(&table),
        Err(DomainError::NoValidPrices { column: "open" })
    );
}

#[test]
fn divisor_is_configurable() {
    let opens = [1.0, 2.0, 3.0, 4.0];
    let seven = ThresholdCalculator::default().calculate_from_opens(&opens).unwrap();
    let two = ThresholdCalculator::new(2.0).calculate_from_opens(&opens).unwrap();
    assert_eq!(seven.upper, two.upper);
    assert!(two.lower < seven.lower);
}

#[test]
fn overrides_replace_only_given_levels() {
    let defaults = AlertThresholds::new(1.2, 1.1);
    assert_eq!(defaults.with_overrides(Some(1.5), None), AlertThresholds::new(1.5, 1.1));
    assert_eq!(defaults.with_overrides(None, None), defaults);
}

#[test]
fn alert_status_compares_latest_close() {
    let band = AlertThresholds::new(1.2, 1.1);
    assert_eq!(AlertStatus::evaluate(Some(1.25), &band), AlertStatus::AboveUpper);
    assert_eq!(AlertStatus::evaluate(Some(1.05), &band), AlertStatus::BelowLower);
    assert_eq!(AlertStatus::evaluate(Some(1.15), &band), AlertStatus::WithinBand);
    assert_eq!(AlertStatus::evaluate(None, &band), AlertStatus::Unknown);
    assert!(AlertStatus::AboveUpper.is_triggered());
    assert!(!AlertStatus::WithinBand.is_triggered());
}

#[quickcheck]
fn upper_is_mean_and_lower_never_exceeds_it(opens: Vec<i32>) -> TestResult {
    if opens.is_empty() {
        return TestResult::discard();
    }
    let opens: Vec<f64> = opens.iter().map(|v| *v as f64 / 1000.0).collect();
    let thresholds = ThresholdCalculator::default().calculate_from_opens(&opens).unwrap();

    let mean = opens.iter().sum::<f64>() / opens.len() as f64;
    let min = opens.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = opens.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    TestResult::from_bool(
        (thresholds.upper - mean).abs() <= 1e-6 * mean.abs().max(1.0)
            && thresholds.upper >= min - 1e-9
            && thresholds.upper <= max + 1e-9
            && thresholds.lower <= thresholds.upper,
    )
}
