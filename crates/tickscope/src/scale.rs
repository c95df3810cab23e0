//! Coordinate scales.
//!
//! Maps the time and price domains onto surface pixels and back, computes
//! axis geometry, and places gridlines and labels. The time axis is a
//! sliding clip of width `period * (1 + zoom)` whose right edge follows the
//! newest tick, shifted by the pan accumulator.

use crate::config::ChartConfig;
use crate::rect::Rect;
use crate::store::SampleStore;
use crate::style::{ChartTheme, TextAlign};
use crate::surface::DrawContext;
use glam::Vec2;

/// Upper bound on time gridlines drawn per frame; the step widens beyond it.
const MAX_TIME_GRIDLINES: usize = 1_024;

/// Vertical offset of time labels below the time axis.
const TIME_LABEL_OFFSET: f32 = 32.0;

/// Pixel endpoints of an axis line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl AxisLine {
    /// Horizontal pixel extent.
    pub fn dx(&self) -> f32 {
        (self.x1 - self.x2).abs()
    }

    /// Vertical pixel extent.
    pub fn dy(&self) -> f32 {
        (self.y1 - self.y2).abs()
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }
}

/// Horizontal (time) axis state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub line: AxisLine,
    /// First tick time.
    pub min: i64,
    /// Last tick time.
    pub max: i64,
    /// Unitless zoom, `clip_width = period * (1 + zoom)`.
    pub zoom: f64,
    /// Pan accumulator in domain units.
    pub clip_right: f64,
    /// Unzoomed visible span.
    pub period: i64,
    /// Gridline step.
    pub label_period: i64,
    min_clip_width: i64,
}

impl TimeAxis {
    /// Smallest zoom keeping `clip_width >= min_clip_width`.
    pub fn min_zoom(&self) -> f64 {
        self.min_clip_width as f64 / self.period as f64 - 1.0
    }

    pub fn clip_width(&self) -> f64 {
        self.period as f64 * (1.0 + self.zoom)
    }

    /// Right edge of the visible span.
    pub fn clip_max(&self) -> f64 {
        self.max as f64 + self.clip_right * (1.0 + self.zoom)
    }

    /// Left edge of the visible span.
    pub fn clip_base(&self) -> f64 {
        self.clip_max() - self.clip_width()
    }
}

/// Vertical (price) axis state.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAxis {
    pub line: AxisLine,
    /// Largest value in the store, 0 when none is positive.
    pub higher: f64,
    /// Gridline fraction and headroom.
    pub interval: f64,
    fallback: f64,
}

impl PriceAxis {
    /// Price shown at the top of the axis.
    pub fn amount_range(&self) -> f64 {
        let h = if self.higher > 0.0 {
            self.higher
        } else {
            self.fallback
        };
        h + h * self.interval * 2.0
    }
}

/// A vertical time gridline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGridline {
    /// Gridline bucket start.
    pub time: i64,
    /// X of the dashed line, at the bucket midpoint.
    pub line_x: f32,
    /// X of the label, at the bucket start.
    pub label_x: f32,
}

/// A horizontal price gridline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceGridline {
    pub y: f32,
    pub value: f64,
}

/// Both axes plus the surface geometry they were laid out for.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub time: TimeAxis,
    pub price: PriceAxis,
    width: f32,
    height: f32,
    margin: f32,
    axis_size: (f32, f32),
}

impl Scales {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            time: TimeAxis {
                line: AxisLine::default(),
                min: 0,
                max: 0,
                zoom: 0.0,
                clip_right: 0.0,
                period: config.base_period,
                label_period: config.label_period,
                min_clip_width: config.min_clip_width,
            },
            price: PriceAxis {
                line: AxisLine::default(),
                higher: 0.0,
                interval: config.price_interval,
                fallback: config.price_fallback,
            },
            width: 0.0,
            height: 0.0,
            margin: config.margin,
            axis_size: config.axis_size,
        }
    }

    /// Compute axis endpoints for a `width` x `height` surface.
    pub fn layout(&mut self, width: u32, height: u32) {
        let (w, h) = (width as f32, height as f32);
        let (size_x, size_y) = self.axis_size;
        let bottom = h - (self.margin + size_y);
        let left = self.margin + size_x;

        self.width = w;
        self.height = h;
        self.time.line = AxisLine {
            x1: left,
            y1: bottom,
            x2: w - self.margin,
            y2: bottom,
        };
        self.price.line = AxisLine {
            x1: left,
            y1: bottom,
            x2: left,
            y2: self.margin,
        };
    }

    /// Recompute domain extrema from the store.
    pub fn refresh_extrema(&mut self, store: &SampleStore) {
        self.time.min = store.first().map_or(0, |t| t.time);
        self.time.max = store.last().map_or(0, |t| t.time);
        self.price.higher = store.max_value().filter(|v| *v > 0.0).unwrap_or(0.0);
    }

    /// Add `delta` to the zoom, respecting the lower bound.
    pub fn apply_zoom(&mut self, delta: f64) {
        self.time.zoom = (self.time.zoom + delta).max(self.time.min_zoom());
    }

    /// Add `delta` domain units to the pan accumulator.
    pub fn apply_pan(&mut self, delta: f64) {
        self.time.clip_right += delta;
    }

    /// Back to the unzoomed view that follows the newest tick.
    pub fn reset_view(&mut self) {
        self.time.zoom = 0.0;
        self.time.clip_right = 0.0;
    }

    pub fn clip_base(&self) -> f64 {
        self.time.clip_base()
    }

    pub fn clip_max(&self) -> f64 {
        self.time.clip_max()
    }

    /// X pixel of a timestamp.
    pub fn pixel_for_date(&self, t: f64) -> f32 {
        let dx = self.time.line.dx() as f64;
        let offset = (self.time.clip_max() - t) * dx / self.time.clip_width();
        (self.width as f64 - self.margin as f64 - offset) as f32
    }

    /// Timestamp under an X pixel.
    pub fn date_for_pixel(&self, x: f32) -> f64 {
        let dx = self.time.line.dx() as f64;
        if dx <= 0.0 {
            return self.time.clip_max();
        }
        self.time.clip_max()
            - (self.width as f64 - self.margin as f64 - x as f64) * self.time.clip_width() / dx
    }

    /// Y pixel of a price.
    pub fn pixel_for_price(&self, p: f64) -> f32 {
        let dy = self.price.line.dy() as f64;
        (self.baseline() as f64 - p * dy / self.price.amount_range()) as f32
    }

    /// Price under a Y pixel.
    pub fn price_for_pixel(&self, y: f32) -> f64 {
        let dy = self.price.line.dy() as f64;
        if dy <= 0.0 {
            return 0.0;
        }
        (self.baseline() as f64 - y as f64) * self.price.amount_range() / dy
    }

    /// Map a tick onto the surface.
    pub fn to_pixel(&self, time: f64, value: f64) -> Vec2 {
        Vec2::new(self.pixel_for_date(time), self.pixel_for_price(value))
    }

    /// Start of the `period`-long gridline bucket containing `t`.
    pub fn period_in_time(&self, t: f64, period: i64) -> f64 {
        let p = period as f64;
        let begin = (self.time.min - period + self.time.min.rem_euclid(period)) as f64;
        begin + p * ((t - begin) / p).floor()
    }

    /// Rectangle plots are clipped to.
    pub fn plot_rect(&self) -> Rect {
        Rect::new(
            self.margin + self.axis_size.0,
            self.margin,
            self.time.line.dx(),
            self.price.line.dy(),
        )
    }

    /// Rectangle time gridlines and labels are clipped to.
    pub fn time_grid_rect(&self) -> Rect {
        let t = &self.time.line;
        let p = &self.price.line;
        Rect::new(
            t.x1,
            p.y2,
            t.x2 - t.x1,
            self.margin + self.axis_size.1 + p.y1 - p.y2,
        )
    }

    /// Vertical gridlines across the visible span.
    pub fn time_gridlines(&self) -> Vec<TimeGridline> {
        let period = self.time.label_period;
        let first = self.period_in_time(self.clip_base(), period);
        let last = self.period_in_time(self.clip_max(), period);

        let needed = ((last - first) / period as f64).floor().max(0.0) as usize + 1;
        let step = period.saturating_mul(needed.div_ceil(MAX_TIME_GRIDLINES) as i64) as f64;
        let half = period as f64 / 2.0;

        let mut lines = Vec::with_capacity(needed.min(MAX_TIME_GRIDLINES));
        let mut t = first;
        while t <= last {
            lines.push(TimeGridline {
                time: t as i64,
                line_x: self.pixel_for_date(t + half),
                label_x: self.pixel_for_date(t),
            });
            t += step;
        }
        lines
    }

    /// Horizontal gridlines, one per `interval` of the axis height.
    pub fn price_gridlines(&self) -> Vec<PriceGridline> {
        let dy = self.price.line.dy() as f64;
        let unit_px = dy * self.price.interval;
        if unit_px <= 0.0 {
            return Vec::new();
        }
        let unit_value = self.price.amount_range() * self.price.interval;

        let mut lines = Vec::new();
        let mut k = 1u32;
        while k as f64 * unit_px < dy {
            lines.push(PriceGridline {
                y: self.height - (self.margin + self.axis_size.1 + (k as f64 * unit_px) as f32),
                value: k as f64 * unit_value,
            });
            k += 1;
        }
        lines
    }

    /// Draw axis lines, gridlines and labels.
    pub fn draw(&self, canvas: &mut dyn DrawContext, theme: &ChartTheme) {
        let axis = theme.axis_stroke();
        canvas.stroke_line(self.time.line.start(), self.time.line.end(), &axis);
        canvas.stroke_line(self.price.line.start(), self.price.line.end(), &axis);

        let grid = theme.grid_stroke();
        let bottom = self.height - self.margin;

        canvas.push_clip(self.time_grid_rect());
        let label = theme.label_style(TextAlign::Center);
        let label_y = self.time.line.y1 + TIME_LABEL_OFFSET;
        for line in self.time_gridlines() {
            canvas.stroke_line(
                Vec2::new(line.line_x, self.price.line.y2),
                Vec2::new(line.line_x, bottom),
                &grid,
            );
            canvas.fill_text(
                &format_time_label(line.time),
                Vec2::new(line.label_x, label_y),
                &label,
            );
        }
        canvas.pop_clip();

        let label = theme.label_style(TextAlign::Right);
        let label_x = self.width - 2.0 * self.margin;
        for line in self.price_gridlines() {
            canvas.stroke_line(
                Vec2::new(self.time.line.x1, line.y),
                Vec2::new(self.time.line.x2, line.y),
                &grid,
            );
            canvas.fill_text(
                &format!("{:.4}", line.value),
                Vec2::new(label_x, line.y),
                &label,
            );
        }
    }

    fn baseline(&self) -> f32 {
        self.height - (self.margin + self.axis_size.1)
    }
}

/// `HH:MM:SS` (UTC) for a millisecond timestamp.
pub fn format_time_label(time_ms: i64) -> String {
    let seconds = time_ms.div_euclid(1_000).rem_euclid(86_400);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3_600,
        (seconds / 60) % 60,
        seconds % 60
    )
}
