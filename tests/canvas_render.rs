#![cfg(target_arch = "wasm32")]
use bar_dashboard::domain::alerts::AlertThresholds;
use bar_dashboard::domain::chart::ChartBuilder;
use bar_dashboard::domain::market_data::{RawSeriesRow, SeriesNormalizer};
use bar_dashboard::infrastructure::rendering::CanvasRenderer;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn draws_candles_and_threshold_lines() {
    let rows = vec![
        RawSeriesRow::new("2024-01-02")
            .with_field("open", "1.11")
            .with_field("high", "1.13")
            .with_field("low", "1.10")
            .with_field("close", "1.12"),
        RawSeriesRow::new("2024-01-01")
            .with_field("open", "1.12")
            .with_field("high", "1.125")
            .with_field("low", "1.09")
            .with_field("close", "1.11"),
    ];
    let table = SeriesNormalizer::normalize(&rows);
    let figure = ChartBuilder::new("EUR/USD")
        .build(&table, AlertThresholds::new(1.115, 1.105))
        .unwrap();

    let canvas = canvas();
    let geometry = CanvasRenderer::new(400, 300).render(&canvas, &figure).unwrap().unwrap();

    assert_eq!(canvas.width(), 400);
    assert_eq!(geometry.candles.len(), 2);
    assert_eq!(geometry.lines.len(), 2);
    assert_eq!(geometry.label(0), Some("2024-01-01"));
}

#[wasm_bindgen_test]
fn bars_without_prices_still_draw_lines() {
    let rows = vec![RawSeriesRow::new("2024-01-01").with_field("open", "1.1")];
    let table = SeriesNormalizer::normalize(&rows);
    let figure = ChartBuilder::new("EUR/USD")
        .build(&table, AlertThresholds::new(1.1, 1.1))
        .unwrap();

    let geometry = CanvasRenderer::new(200, 100).render(&canvas(), &figure).unwrap().unwrap();
    assert!(geometry.candles.is_empty());
    assert_eq!(geometry.lines.len(), 2);
}
