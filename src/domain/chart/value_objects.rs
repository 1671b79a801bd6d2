use serde::{Serialize, Serializer};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// CSS color string usable by both canvas and plotly
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!(
                "rgba({}, {}, {}, {})",
                (hex >> 16) & 0xFF,
                (hex >> 8) & 0xFF,
                hex & 0xFF,
                self.a
            )
        }
    }

    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    /// CSS `indigo` (#4b0082)
    pub const INDIGO: Color = Color::rgb(75.0 / 255.0, 0.0, 130.0 / 255.0);
    pub const BULLISH: Color = Color::rgb(0.0, 1.0, 136.0 / 255.0);
    pub const BEARISH: Color = Color::rgb(1.0, 68.0 / 255.0, 68.0 / 255.0);
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// Plotly dash names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, EnumString, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    #[default]
    Solid,
    Dot,
    Dash,
    DashDot,
}

impl LineDash {
    /// Canvas `setLineDash` segments for a given line width
    pub fn segments(&self) -> Vec<f64> {
        match self {
            LineDash::Solid => Vec::new(),
            LineDash::Dot => vec![2.0, 4.0],
            LineDash::Dash => vec![8.0, 4.0],
            LineDash::DashDot => vec![8.0, 4.0, 2.0, 4.0],
        }
    }
}

/// Value Object - stroke of a line trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub dash: LineDash,
}

impl LineStyle {
    pub const fn new(color: Color, width: f64, dash: LineDash) -> Self {
        Self { color, width, dash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_colors() {
        assert_eq!(Color::BLUE.to_css(), "#0000ff");
        assert_eq!(Color::INDIGO.to_css(), "#4b0082");
        assert_eq!(Color::BULLISH.to_hex(), 0x00ff88);
        assert_eq!(Color::new(0.0, 0.0, 1.0, 0.5).to_css(), "rgba(0, 0, 255, 0.5)");
    }

    #[test]
    fn dashdot_serializes_like_plotly() {
        assert_eq!(serde_json::to_string(&LineDash::DashDot).unwrap(), "\"dashdot\"");
        assert_eq!(LineDash::DashDot.as_ref(), "dashdot");
        assert!(LineDash::Solid.segments().is_empty());
    }
}
