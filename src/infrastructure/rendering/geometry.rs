use crate::domain::chart::{Figure, LineStyle};

const PADDING_LEFT: f64 = 12.0;
const PADDING_TOP: f64 = 36.0;
const PADDING_BOTTOM: f64 = 28.0;
const PRICE_SCALE_WIDTH: f64 = 84.0;
const PRICE_MARGIN_RATIO: f64 = 0.05;
const BODY_WIDTH_RATIO: f64 = 0.6;

/// Inner drawing rectangle, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Pre-computed screen data for one candle
#[derive(Debug, Clone, PartialEq)]
pub struct CandleGeometry {
    pub slot: usize,
    pub x: f64,
    pub body_width: f64,
    pub open_y: f64,
    pub close_y: f64,
    pub high_y: f64,
    pub low_y: f64,
    pub is_bullish: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub name: String,
    pub value: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
    pub style: LineStyle,
}

/// Figure laid out on a canvas. Slots run oldest (left) to newest (right)
/// whatever order the figure's categories arrive in.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub plot: PlotArea,
    pub slot_width: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub candles: Vec<CandleGeometry>,
    pub lines: Vec<LineGeometry>,
    /// slot -> index into the figure's candlestick arrays
    slot_to_source: Vec<usize>,
    /// slot -> x category label
    labels: Vec<String>,
}

impl ChartGeometry {
    /// `None` when the figure has no candlestick trace, no bars, or no price
    /// at all to scale against.
    pub fn from_figure(figure: &Figure, width: u32, height: u32) -> Option<Self> {
        let trace = figure.candlestick()?;
        if trace.is_empty() {
            return None;
        }

        let plot = PlotArea {
            left: PADDING_LEFT,
            top: PADDING_TOP,
            width: (width as f64 - PADDING_LEFT - PRICE_SCALE_WIDTH).max(1.0),
            height: (height as f64 - PADDING_TOP - PADDING_BOTTOM).max(1.0),
        };

        let count = trace.len();
        let newest_first = trace.x.first() > trace.x.last();
        let slot_to_source: Vec<usize> = if newest_first {
            (0..count).rev().collect()
        } else {
            (0..count).collect()
        };
        let labels = slot_to_source.iter().map(|&i| trace.x[i].clone()).collect();

        let (min_price, max_price) = Self::price_span(figure)?;
        let slot_width = plot.width / count as f64;

        let mut geometry = Self {
            plot,
            slot_width,
            min_price,
            max_price,
            candles: Vec::with_capacity(count),
            lines: Vec::new(),
            slot_to_source,
            labels,
        };

        for slot in 0..count {
            let source = geometry.slot_to_source[slot];
            let Some((open, high, low, close)) = trace.ohlc_at(source) else {
                continue;
            };
            geometry.candles.push(CandleGeometry {
                slot,
                x: geometry.slot_center(slot),
                body_width: slot_width * BODY_WIDTH_RATIO,
                open_y: geometry.price_to_y(open),
                close_y: geometry.price_to_y(close),
                high_y: geometry.price_to_y(high),
                low_y: geometry.price_to_y(low),
                is_bullish: close >= open,
            });
        }

        for line in figure.lines() {
            let (Some(value), Some(from), Some(to)) = (line.level(), line.x.first(), line.x.last())
            else {
                continue;
            };
            let (x_start, x_end) = match (geometry.slot_of_label(from), geometry.slot_of_label(to)) {
                (Some(a), Some(b)) => {
                    let (lo, hi) = (a.min(b), a.max(b));
                    (
                        geometry.slot_center(lo) - slot_width / 2.0,
                        geometry.slot_center(hi) + slot_width / 2.0,
                    )
                }
                _ => (plot.left, plot.right()),
            };
            geometry.lines.push(LineGeometry {
                name: line.name.clone(),
                value,
                x_start,
                x_end,
                y: geometry.price_to_y(value),
                style: line.line,
            });
        }

        Some(geometry)
    }

    /// Lowest low / highest high, widened to include every threshold level,
    /// plus a 5% margin on both sides.
    fn price_span(figure: &Figure) -> Option<(f64, f64)> {
        let trace = figure.candlestick()?;
        let values = trace
            .low
            .iter()
            .chain(trace.high.iter())
            .flatten()
            .copied()
            .chain(figure.lines().filter_map(|line| line.level()));

        let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

        let range = if max > min { max - min } else { min.abs().max(1.0) * 0.02 };
        let margin = range * PRICE_MARGIN_RATIO;
        if max > min {
            Some((min - margin, max + margin))
        } else {
            Some((min - range / 2.0 - margin, max + range / 2.0 + margin))
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_to_source.len()
    }

    pub fn slot_center(&self, slot: usize) -> f64 {
        self.plot.left + (slot as f64 + 0.5) * self.slot_width
    }

    pub fn price_to_y(&self, price: f64) -> f64 {
        let normalized = (price - self.min_price) / (self.max_price - self.min_price);
        self.plot.top + (1.0 - normalized) * self.plot.height
    }

    pub fn y_to_price(&self, y: f64) -> f64 {
        let normalized = 1.0 - (y - self.plot.top) / self.plot.height;
        self.min_price + normalized * (self.max_price - self.min_price)
    }

    /// Hit test for the tooltip
    pub fn slot_at(&self, x: f64) -> Option<usize> {
        if x < self.plot.left || x >= self.plot.right() {
            return None;
        }
        let slot = ((x - self.plot.left) / self.slot_width).floor() as usize;
        (slot < self.slot_count()).then_some(slot)
    }

    pub fn source_index(&self, slot: usize) -> Option<usize> {
        self.slot_to_source.get(slot).copied()
    }

    pub fn label(&self, slot: usize) -> Option<&str> {
        self.labels.get(slot).map(String::as_str)
    }

    fn slot_of_label(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Evenly spaced price levels from bottom to top, inclusive
    pub fn price_ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min_price];
        }
        let step = (self.max_price - self.min_price) / (count - 1) as f64;
        (0..count).map(|i| self.min_price + step * i as f64).collect()
    }

    /// At most `max_labels` slots to label on the time axis
    pub fn time_label_slots(&self, max_labels: usize) -> Vec<usize> {
        let count = self.slot_count();
        if max_labels == 0 || count == 0 {
            return Vec::new();
        }
        let stride = count.div_ceil(max_labels).max(1);
        (0..count).step_by(stride).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alerts::AlertThresholds;
    use crate::domain::chart::ChartBuilder;
    use crate::domain::market_data::{SeriesRow, SeriesTable};
    use std::collections::BTreeMap;

    fn row(datetime: &str, open: f64, high: f64, low: f64, close: f64) -> SeriesRow {
        SeriesRow {
            datetime: datetime.to_string(),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            volume: None,
            extra: BTreeMap::new(),
        }
    }

    fn newest_first_figure() -> Figure {
        let table = SeriesTable::new(vec![
            row("2024-01-03", 12.0, 14.0, 11.0, 13.0),
            row("2024-01-02", 11.0, 13.0, 10.0, 12.0),
            row("2024-01-01", 10.0, 12.0, 9.0, 11.0),
        ]);
        ChartBuilder::new("EUR/USD").build(&table, AlertThresholds::new(11.0, 10.5)).unwrap()
    }

    #[test]
    fn slots_run_oldest_to_newest() {
        let geometry = ChartGeometry::from_figure(&newest_first_figure(), 400, 300).unwrap();
        assert_eq!(geometry.slot_count(), 3);
        assert_eq!(geometry.label(0), Some("2024-01-01"));
        assert_eq!(geometry.source_index(0), Some(2));
        assert!(geometry.candles[0].x < geometry.candles[2].x);
    }

    #[test]
    fn threshold_lines_span_the_whole_series() {
        let geometry = ChartGeometry::from_figure(&newest_first_figure(), 400, 300).unwrap();
        assert_eq!(geometry.lines.len(), 2);
        for line in &geometry.lines {
            assert!((line.x_start - geometry.plot.left).abs() < 1e-9);
            assert!((line.x_end - geometry.plot.right()).abs() < 1e-9);
        }
    }

    #[test]
    fn prices_map_inside_plot_and_back() {
        let geometry = ChartGeometry::from_figure(&newest_first_figure(), 400, 300).unwrap();
        for candle in &geometry.candles {
            assert!(candle.high_y >= geometry.plot.top && candle.low_y <= geometry.plot.bottom());
            assert!(candle.high_y <= candle.low_y);
        }
        let y = geometry.price_to_y(12.5);
        assert!((geometry.y_to_price(y) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn hit_test_outside_plot_is_none() {
        let geometry = ChartGeometry::from_figure(&newest_first_figure(), 400, 300).unwrap();
        assert_eq!(geometry.slot_at(0.0), None);
        assert_eq!(geometry.slot_at(geometry.plot.left + 1.0), Some(0));
        assert_eq!(geometry.slot_at(geometry.plot.right() - 1.0), Some(2));
    }

    #[test]
    fn flat_series_still_gets_a_price_span() {
        let table = SeriesTable::new(vec![row("t1", 1.1, 1.1, 1.1, 1.1)]);
        let figure = ChartBuilder::new("EUR/USD")
            .build(&table, AlertThresholds::new(1.1, 1.1))
            .unwrap();
        let geometry = ChartGeometry::from_figure(&figure, 400, 300).unwrap();
        assert!(geometry.max_price > geometry.min_price);
    }
}
