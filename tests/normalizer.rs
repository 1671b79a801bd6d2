use bar_dashboard::domain::market_data::services::coerce_numeric;
use bar_dashboard::domain::market_data::{PriceColumn, RawSeriesRow, SeriesNormalizer};
use quickcheck_macros::quickcheck;
use serde_json::json;

fn raw(datetime: &str, open: &str, high: &str, low: &str, close: &str) -> RawSeriesRow {
    RawSeriesRow::new(datetime)
        .with_field("open", open)
        .with_field("high", high)
        .with_field("low", low)
        .with_field("close", close)
}

#[test]
fn string_prices_become_numbers() {
    let table = SeriesNormalizer::normalize(&[raw("2024-01-01 04:00:00", "1.1", "1.2", "1.0", "1.15")]);
    let row = &table.rows()[0];
    assert_eq!(row.datetime, "2024-01-01 04:00:00");
    assert_eq!(row.ohlc(), Some((1.1, 1.2, 1.0, 1.15)));
    assert_eq!(row.volume, None);
}

#[test]
fn unparsable_cells_are_missing_not_errors() {
    let table = SeriesNormalizer::normalize(&[
        raw("t2", "1.0", "1.1", "0.9", "1.05"),
        raw("t1", "N/A", "1.1", "", "1.05"),
    ]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.column(PriceColumn::Open), vec![Some(1.0), None]);
    assert_eq!(table.column(PriceColumn::Low), vec![Some(0.9), None]);
    assert!(table.rows()[1].ohlc().is_none());
}

#[test]
fn unknown_columns_are_kept_numeric() {
    let row = RawSeriesRow::new("t1")
        .with_field("open", "1.0")
        .with_field("volume", "1200")
        .with_field("vwap", "1.01")
        .with_field("note", json!({"nested": true}));
    let table = SeriesNormalizer::normalize(&[row]);
    let row = &table.rows()[0];
    assert_eq!(row.volume, Some(1200.0));
    assert_eq!(row.extra.get("vwap"), Some(&Some(1.01)));
    assert_eq!(row.extra.get("note"), Some(&None));
    assert!(!row.extra.contains_key("open"));
}

#[test]
fn coercion_rejects_non_finite_values() {
    assert_eq!(coerce_numeric(&json!(" 2.5 ")), Some(2.5));
    assert_eq!(coerce_numeric(&json!(3)), Some(3.0));
    assert_eq!(coerce_numeric(&json!("inf")), None);
    assert_eq!(coerce_numeric(&json!("NaN")), None);
    assert_eq!(coerce_numeric(&json!(null)), None);
    assert_eq!(coerce_numeric(&json!(true)), None);
}

#[quickcheck]
fn normalization_preserves_rows_and_yields_finite_cells(cells: Vec<(f64, String)>) -> bool {
    let rows: Vec<RawSeriesRow> = cells
        .iter()
        .enumerate()
        .map(|(i, (number, text))| {
            RawSeriesRow::new(format!("t{}", i))
                .with_field("open", number.to_string())
                .with_field("high", *number)
                .with_field("low", text.as_str())
                .with_field("close", format!("{:e}", number))
        })
        .collect();

    let table = SeriesNormalizer::normalize(&rows);
    table.len() == rows.len()
        && table.rows().iter().all(|row| {
            [row.open, row.high, row.low, row.close, row.volume]
                .iter()
                .all(|cell| cell.is_none_or(f64::is_finite))
        })
}
