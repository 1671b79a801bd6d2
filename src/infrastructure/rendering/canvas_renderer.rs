use super::geometry::{CandleGeometry, ChartGeometry, LineGeometry};
use crate::domain::{
    chart::{Color, Figure, LineStyle, format_price},
    errors::RenderingError,
    logging::LogComponent,
};
use crate::{log_debug, log_warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#131722";
const GRID: &str = "#2a2e39";
const AXIS_TEXT: &str = "#aaaaaa";
const WICK: &str = "#888888";
const FONT: &str = "12px Arial";
const PRICE_TICKS: usize = 6;
const TIME_LABELS: usize = 6;

/// Canvas 2D renderer for a [`Figure`]
pub struct CanvasRenderer {
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn context(&self, canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderingError> {
        canvas.set_width(self.width);
        canvas.set_height(self.height);

        canvas
            .get_context("2d")
            .map_err(|e| RenderingError::CanvasAccessFailed(format!("{:?}", e)))?
            .ok_or_else(|| RenderingError::CanvasAccessFailed("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderingError::CanvasAccessFailed("not a 2d context".to_string()))
    }

    /// Draw the whole figure; the returned geometry is used for hit testing
    pub fn render(
        &self,
        canvas: &HtmlCanvasElement,
        figure: &Figure,
    ) -> Result<Option<ChartGeometry>, RenderingError> {
        let context = self.context(canvas)?;
        let (w, h) = (self.width as f64, self.height as f64);

        context.clear_rect(0.0, 0.0, w, h);
        context.set_fill_style_str(BACKGROUND);
        context.fill_rect(0.0, 0.0, w, h);

        let Some(geometry) = ChartGeometry::from_figure(figure, self.width, self.height) else {
            log_warn!(LogComponent::Infrastructure("CanvasRenderer"), "nothing to draw");
            self.render_no_data_message(&context)?;
            return Ok(None);
        };

        self.render_grid(&context, &geometry)?;
        for candle in &geometry.candles {
            Self::render_candle(&context, candle);
        }
        for line in &geometry.lines {
            self.render_threshold_line(&context, &geometry, line)?;
        }
        self.render_legend(&context, figure, &geometry)?;

        log_debug!(
            LogComponent::Infrastructure("CanvasRenderer"),
            "drew {} candles and {} lines",
            geometry.candles.len(),
            geometry.lines.len()
        );
        Ok(Some(geometry))
    }

    fn render_grid(
        &self,
        context: &CanvasRenderingContext2d,
        geometry: &ChartGeometry,
    ) -> Result<(), RenderingError> {
        let plot = geometry.plot;
        context.set_stroke_style_str(GRID);
        context.set_fill_style_str(AXIS_TEXT);
        context.set_line_width(1.0);
        context.set_font(FONT);

        for price in geometry.price_ticks(PRICE_TICKS) {
            let y = geometry.price_to_y(price);
            context.begin_path();
            context.move_to(plot.left, y);
            context.line_to(plot.right(), y);
            context.stroke();
            context
                .fill_text(&format_price(price), plot.right() + 8.0, y + 4.0)
                .map_err(draw_failed)?;
        }

        for slot in geometry.time_label_slots(TIME_LABELS) {
            let Some(label) = geometry.label(slot) else {
                continue;
            };
            let x = geometry.slot_center(slot);
            context.begin_path();
            context.move_to(x, plot.top);
            context.line_to(x, plot.bottom());
            context.stroke();
            context
                .fill_text(label, x - 30.0, plot.bottom() + 18.0)
                .map_err(draw_failed)?;
        }
        Ok(())
    }

    fn render_candle(context: &CanvasRenderingContext2d, candle: &CandleGeometry) {
        let color = (if candle.is_bullish { Color::BULLISH } else { Color::BEARISH }).to_css();

        context.set_stroke_style_str(WICK);
        context.set_line_width(1.0);
        context.begin_path();
        context.move_to(candle.x, candle.high_y);
        context.line_to(candle.x, candle.low_y);
        context.stroke();

        context.set_fill_style_str(&color);
        context.set_stroke_style_str(&color);

        let half = candle.body_width / 2.0;
        let body_top = candle.open_y.min(candle.close_y);
        let body_height = (candle.open_y - candle.close_y).abs();

        if body_height < 1.0 {
            // Doji
            context.begin_path();
            context.move_to(candle.x - half, candle.open_y);
            context.line_to(candle.x + half, candle.open_y);
            context.stroke();
        } else if candle.is_bullish {
            context.stroke_rect(candle.x - half, body_top, candle.body_width, body_height);
        } else {
            context.fill_rect(candle.x - half, body_top, candle.body_width, body_height);
        }
    }

    fn render_threshold_line(
        &self,
        context: &CanvasRenderingContext2d,
        geometry: &ChartGeometry,
        line: &LineGeometry,
    ) -> Result<(), RenderingError> {
        let color = line.style.color.to_css();
        apply_line_style(context, &line.style)?;

        context.begin_path();
        context.move_to(line.x_start, line.y);
        context.line_to(line.x_end, line.y);
        context.stroke();
        reset_line_dash(context)?;

        context.set_fill_style_str(&color);
        context.set_font(FONT);
        context
            .fill_text(&format_price(line.value), geometry.plot.right() + 8.0, line.y - 4.0)
            .map_err(draw_failed)
    }

    fn render_legend(
        &self,
        context: &CanvasRenderingContext2d,
        figure: &Figure,
        geometry: &ChartGeometry,
    ) -> Result<(), RenderingError> {
        context.set_font(FONT);
        let mut x = geometry.plot.left;
        let y = geometry.plot.top / 2.0;

        if let Some(trace) = figure.candlestick() {
            context.set_fill_style_str(&Color::BULLISH.to_css());
            context.fill_rect(x, y - 5.0, 10.0, 10.0);
            context.set_fill_style_str(AXIS_TEXT);
            context.fill_text(&trace.name, x + 14.0, y + 4.0).map_err(draw_failed)?;
            x += 24.0 + text_width(context, &trace.name);
        }

        for line in &geometry.lines {
            apply_line_style(context, &line.style)?;
            context.begin_path();
            context.move_to(x, y);
            context.line_to(x + 18.0, y);
            context.stroke();
            reset_line_dash(context)?;

            context.set_fill_style_str(AXIS_TEXT);
            context.fill_text(&line.name, x + 22.0, y + 4.0).map_err(draw_failed)?;
            x += 32.0 + text_width(context, &line.name);
        }
        Ok(())
    }

    fn render_no_data_message(&self, context: &CanvasRenderingContext2d) -> Result<(), RenderingError> {
        context.set_fill_style_str("#ffffff");
        context.set_font("16px Arial");
        context
            .fill_text("No chart data available", 50.0, self.height as f64 / 2.0)
            .map_err(draw_failed)
    }
}

fn apply_line_style(context: &CanvasRenderingContext2d, style: &LineStyle) -> Result<(), RenderingError> {
    context.set_stroke_style_str(&style.color.to_css());
    // Sub-pixel widths vanish on a 2D canvas
    context.set_line_width(style.width.max(1.0));
    let segments: js_sys::Array = style.dash.segments().into_iter().map(JsValue::from_f64).collect();
    context.set_line_dash(&segments).map_err(draw_failed)
}

fn reset_line_dash(context: &CanvasRenderingContext2d) -> Result<(), RenderingError> {
    context.set_line_dash(&js_sys::Array::new()).map_err(draw_failed)
}

fn text_width(context: &CanvasRenderingContext2d, text: &str) -> f64 {
    context.measure_text(text).map(|m| m.width()).unwrap_or(text.len() as f64 * 7.0)
}

fn draw_failed(error: JsValue) -> RenderingError {
    RenderingError::DrawFailed(format!("{:?}", error))
}
