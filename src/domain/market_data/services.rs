use super::entities::{RawSeriesRow, SeriesRow, SeriesTable};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use serde_json::Value;
use std::collections::BTreeMap;

/// Coerces raw upstream rows into numeric series rows.
///
/// Every column except `datetime` is converted; a cell that is not a finite
/// number becomes `None` instead of failing. Rows are never dropped.
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    pub fn normalize(raw_rows: &[RawSeriesRow]) -> SeriesTable {
        let rows: Vec<SeriesRow> = raw_rows.iter().map(Self::normalize_row).collect();

        let missing = rows
            .iter()
            .filter(|row| row.ohlc().is_none())
            .count();
        log_debug!(
            LogComponent::Domain("Normalizer"),
            "normalized {} rows ({} with missing OHLC cells)",
            rows.len(),
            missing
        );

        SeriesTable::new(rows)
    }

    fn normalize_row(raw: &RawSeriesRow) -> SeriesRow {
        let mut extra: BTreeMap<String, Option<f64>> = raw
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), coerce_numeric(value)))
            .collect();

        let open = extra.remove("open").flatten();
        let high = extra.remove("high").flatten();
        let low = extra.remove("low").flatten();
        let close = extra.remove("close").flatten();
        let volume = extra.remove("volume").flatten();

        SeriesRow { datetime: raw.datetime.clone(), open, high, low, close, volume, extra }
    }
}

/// Lenient numeric conversion: numbers and numeric strings pass, anything
/// else (including `inf` / `NaN`) is treated as missing.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Fewer than two values
/// yield 0.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let Some(avg) = mean(values) else {
        return 0.0;
    };
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_numeric(&json!("1.10")), Some(1.10));
        assert_eq!(coerce_numeric(&json!(" 42 ")), Some(42.0));
        assert_eq!(coerce_numeric(&json!(3)), Some(3.0));
    }

    #[test]
    fn coerce_rejects_everything_else() {
        for value in [json!("N/A"), json!(""), json!(null), json!(true), json!("inf"), json!("NaN"), json!([1])] {
            assert_eq!(coerce_numeric(&value), None, "{value}");
        }
    }

    #[test]
    fn std_dev_matches_sample_formula() {
        // values 2,4,4,4,5,5,7,9: mean 5, sum of squares 32, n-1 = 7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert!((sample_std_dev(&values) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[1.5]), 0.0);
        assert_eq!(sample_std_dev(&[]), 0.0);
    }
}
