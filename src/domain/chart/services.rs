use super::entities::{CandlestickTrace, Figure, LineTrace, Trace};
use super::value_objects::{Color, LineDash, LineStyle};
use crate::domain::alerts::AlertThresholds;
use crate::domain::errors::DomainResult;
use crate::domain::market_data::{PriceColumn, SeriesTable};

pub const UPPER_LINE_NAME: &str = "upper";
pub const LOWER_LINE_NAME: &str = "lower";

pub const UPPER_LINE_STYLE: LineStyle = LineStyle::new(Color::BLUE, 0.5, LineDash::Solid);
pub const LOWER_LINE_STYLE: LineStyle = LineStyle::new(Color::INDIGO, 0.5, LineDash::DashDot);

/// Quote precision: five decimals for majors, three for yen-style prices
pub fn format_price(price: f64) -> String {
    if price.abs() >= 100.0 { format!("{:.3}", price) } else { format!("{:.5}", price) }
}

/// Domain service composing the candlestick and threshold traces
pub struct ChartBuilder {
    trace_name: String,
}

impl ChartBuilder {
    pub fn new(trace_name: impl Into<String>) -> Self {
        Self { trace_name: trace_name.into() }
    }

    /// Exactly three traces: candles, `upper`, `lower`. Both lines span the
    /// first to last datetime of the table. An empty table is an error.
    pub fn build(&self, table: &SeriesTable, thresholds: AlertThresholds) -> DomainResult<Figure> {
        let (first, last) = table.time_range()?;

        let candles = CandlestickTrace {
            name: self.trace_name.clone(),
            x: table.datetimes(),
            open: table.column(PriceColumn::Open),
            high: table.column(PriceColumn::High),
            low: table.column(PriceColumn::Low),
            close: table.column(PriceColumn::Close),
        };

        let upper =
            LineTrace::horizontal(UPPER_LINE_NAME, first, last, thresholds.upper, UPPER_LINE_STYLE);
        let lower =
            LineTrace::horizontal(LOWER_LINE_NAME, first, last, thresholds.lower, LOWER_LINE_STYLE);

        Ok(Figure::new(vec![
            Trace::Candlestick(candles),
            Trace::Line(upper),
            Trace::Line(lower),
        ]))
    }
}
