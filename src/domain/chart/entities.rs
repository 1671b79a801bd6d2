use super::value_objects::LineStyle;
use serde::Serialize;

/// Candlestick trace: one x category and four prices per bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub x: Vec<String>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
}

impl CandlestickTrace {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// OHLC for bar `index` when all four cells are present
    pub fn ohlc_at(&self, index: usize) -> Option<(f64, f64, f64, f64)> {
        Some((
            (*self.open.get(index)?)?,
            (*self.high.get(index)?)?,
            (*self.low.get(index)?)?,
            (*self.close.get(index)?)?,
        ))
    }
}

/// Straight line trace, rendered by plotly as `scatter` in `lines` mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub mode: &'static str,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub line: LineStyle,
}

impl LineTrace {
    /// Constant-value line spanning `from..to`
    pub fn horizontal(name: &str, from: &str, to: &str, value: f64, line: LineStyle) -> Self {
        Self {
            name: name.to_string(),
            mode: "lines",
            x: vec![from.to_string(), to.to_string()],
            y: vec![value, value],
            line,
        }
    }

    /// The y value when both points share it
    pub fn level(&self) -> Option<f64> {
        match self.y.as_slice() {
            [a, b] if a == b => Some(*a),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Trace {
    #[serde(rename = "candlestick")]
    Candlestick(CandlestickTrace),
    #[serde(rename = "scatter")]
    Line(LineTrace),
}

impl Trace {
    pub fn name(&self) -> &str {
        match self {
            Trace::Candlestick(t) => &t.name,
            Trace::Line(t) => &t.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub rangeslider: RangeSlider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub xaxis: XAxis,
}

impl Default for Layout {
    fn default() -> Self {
        Self { xaxis: XAxis { rangeslider: RangeSlider { visible: false } } }
    }
}

/// Entity - renderable chart: serializes to a plotly `{data, layout}` object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    #[serde(rename = "data")]
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self { traces, layout: Layout::default() }
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    pub fn candlestick(&self) -> Option<&CandlestickTrace> {
        self.traces.iter().find_map(|trace| match trace {
            Trace::Candlestick(t) => Some(t),
            Trace::Line(_) => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineTrace> {
        self.traces.iter().filter_map(|trace| match trace {
            Trace::Line(t) => Some(t),
            Trace::Candlestick(_) => None,
        })
    }

    pub fn line(&self, name: &str) -> Option<&LineTrace> {
        self.lines().find(|line| line.name == name)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
