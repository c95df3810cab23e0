//! Chart styling types.
//!
//! Provides the styling vocabulary shared by the engine and drawing backends:
//! - Stroke configuration with dash patterns
//! - Text anchoring for axis labels
//! - The chart theme (colors and stroke widths)

use tickscope_core::Color;

/// Dash pattern for stroked lines.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    /// Alternating lengths: [on, off, on, off, ...]
    ///
    /// Empty = solid line.
    pub segments: Vec<f32>,

    /// Phase offset (starting position in the pattern).
    pub phase: f32,
}

impl Default for DashPattern {
    fn default() -> Self {
        Self::SOLID
    }
}

impl DashPattern {
    /// Solid line (no dashes).
    pub const SOLID: DashPattern = DashPattern {
        segments: Vec::new(),
        phase: 0.0,
    };

    /// Create a dashed line pattern.
    ///
    /// # Arguments
    ///
    /// * `dash` - Length of the dash (on segment)
    /// * `gap` - Length of the gap (off segment)
    pub fn dashed(dash: f32, gap: f32) -> Self {
        Self {
            segments: vec![dash, gap],
            phase: 0.0,
        }
    }

    /// Check if this is a solid line.
    pub fn is_solid(&self) -> bool {
        self.segments.is_empty() || self.segments.iter().all(|s| *s <= 0.0)
    }

    /// Total length of one pattern cycle.
    pub fn cycle_length(&self) -> f32 {
        self.segments.iter().sum()
    }

    /// Whether the pattern is "on" at the given distance along the line.
    pub fn is_on_at(&self, distance: f32) -> bool {
        if self.is_solid() {
            return true;
        }
        let cycle = self.cycle_length();
        let mut pos = (distance + self.phase).rem_euclid(cycle);
        for (i, len) in self.segments.iter().enumerate() {
            if pos < *len {
                return i % 2 == 0;
            }
            pos -= len;
        }
        true
    }
}

/// Style for stroked polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    /// Line color.
    pub color: Color,
    /// Line thickness in pixels.
    pub width: f32,
    /// Dash pattern.
    pub dash: DashPattern,
}

impl StrokeStyle {
    /// Solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: DashPattern::SOLID,
        }
    }

    /// Set the dash pattern.
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Horizontal anchoring of a text label relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Position is the left edge of the text.
    #[default]
    Left,
    /// Position is the horizontal center.
    Center,
    /// Position is the right edge.
    Right,
}

/// Style for text labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            align: TextAlign::Left,
        }
    }
}

/// Colors and stroke widths used when drawing a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    /// Fill for the whole surface.
    pub background: Color,
    /// Axis lines.
    pub axis: Color,
    pub axis_width: f32,
    /// Dashed gridlines.
    pub grid: Color,
    pub grid_width: f32,
    /// Axis label text.
    pub label: Color,
    pub label_size: f32,
    /// Raw tick trace.
    pub line: Color,
    pub line_width: f32,
    /// Candle bodies and wicks.
    pub bullish: Color,
    pub bearish: Color,
    pub neutral: Color,
    pub wick_width: f32,
    /// Moving-average trace.
    pub moving_average: Color,
    pub moving_average_width: f32,
}

impl ChartTheme {
    /// Light theme.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            axis: Color::BLACK,
            axis_width: 1.0,
            grid: Color::from_rgb_u8(200, 200, 200),
            grid_width: 1.0,
            label: Color::from_rgb_u8(60, 60, 60),
            label_size: 12.0,
            line: Color::from_hex(0x3D5DBA),
            line_width: 1.5,
            bullish: Color::from_hex(0x26A69A),
            bearish: Color::from_hex(0xEF5350),
            neutral: Color::from_rgb_u8(128, 128, 128),
            wick_width: 1.0,
            moving_average: Color::from_hex(0xFF9800),
            moving_average_width: 2.0,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb_u8(20, 22, 28),
            axis: Color::from_rgb_u8(200, 200, 200),
            grid: Color::from_rgb_u8(60, 64, 72),
            label: Color::from_rgb_u8(180, 180, 180),
            line: Color::from_hex(0x64B5F6),
            ..Self::light()
        }
    }

    /// Stroke for the axis lines.
    pub fn axis_stroke(&self) -> StrokeStyle {
        StrokeStyle::solid(self.axis, self.axis_width)
    }

    /// Dashed `[5, 3]` stroke for gridlines.
    pub fn grid_stroke(&self) -> StrokeStyle {
        StrokeStyle::solid(self.grid, self.grid_width).with_dash(DashPattern::dashed(5.0, 3.0))
    }

    /// Text style for axis labels with the given anchoring.
    pub fn label_style(&self, align: TextAlign) -> TextStyle {
        TextStyle {
            color: self.label,
            size: self.label_size,
            align,
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}
