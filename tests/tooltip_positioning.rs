use bar_dashboard::app::TooltipData;
use bar_dashboard::domain::alerts::AlertThresholds;
use bar_dashboard::domain::chart::ChartBuilder;
use bar_dashboard::domain::market_data::{RawSeriesRow, SeriesNormalizer};
use bar_dashboard::infrastructure::rendering::ChartGeometry;

fn figure() -> bar_dashboard::domain::chart::Figure {
    let rows = vec![
        RawSeriesRow::new("2024-01-03")
            .with_field("open", "1.12")
            .with_field("high", "1.14")
            .with_field("low", "1.11")
            .with_field("close", "1.13"),
        RawSeriesRow::new("2024-01-02").with_field("open", "1.11").with_field("close", "1.12"),
        RawSeriesRow::new("2024-01-01")
            .with_field("open", "1.10")
            .with_field("high", "1.12")
            .with_field("low", "1.09")
            .with_field("close", "1.08"),
    ];
    ChartBuilder::new("EUR/USD")
        .build(&SeriesNormalizer::normalize(&rows), AlertThresholds::new(1.11, 1.10))
        .unwrap()
}

#[test]
fn hovering_the_leftmost_slot_shows_the_oldest_bar() {
    let figure = figure();
    let geometry = ChartGeometry::from_figure(&figure, 600, 400).unwrap();

    let x = geometry.slot_center(0);
    let index = geometry.source_index(geometry.slot_at(x).unwrap()).unwrap();
    let tooltip = TooltipData::from_figure(&figure, index, x, 50.0).unwrap();

    assert!(tooltip.formatted_text.starts_with("🔴 EUR/USD"));
    assert!(tooltip.formatted_text.contains("Close:  1.08000"));
    assert!(tooltip.formatted_text.ends_with("2024-01-01"));
    assert_eq!((tooltip.x, tooltip.y), (x, 50.0));
}

#[test]
fn incomplete_bar_has_no_tooltip() {
    let figure = figure();
    let geometry = ChartGeometry::from_figure(&figure, 600, 400).unwrap();
    assert_eq!(geometry.candles.len(), 2);

    let index = geometry.source_index(1).unwrap();
    assert!(TooltipData::from_figure(&figure, index, 0.0, 0.0).is_none());
}
