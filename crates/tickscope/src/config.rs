//! Chart configuration.

use crate::aggregate::MovingAverageKind;
use crate::error::{ChartError, ChartResult};
use crate::style::ChartTheme;

/// Configuration for a [`Chart`](crate::Chart).
///
/// All durations are in milliseconds, all lengths in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Gap between the surface edge and the axes.
    pub margin: f32,
    /// Space reserved beside the price axis (x) and below the time axis (y).
    pub axis_size: (f32, f32),
    /// Unzoomed visible time span.
    pub base_period: i64,
    /// Step between time gridlines.
    pub label_period: i64,
    /// Smallest visible span zoom may reach.
    pub min_clip_width: i64,
    /// Fraction of the price range per gridline, also the headroom above the maximum.
    pub price_interval: f64,
    /// Price range used while no positive value has been seen.
    pub price_fallback: f64,
    /// Wheel delta divisor.
    pub zoom_sensitivity: f32,
    /// Pan distance per dragged pixel, in domain units.
    pub pan_sensitivity: f32,
    /// Candle bucket duration.
    pub candle_period: i64,
    /// Moving-average flavour.
    pub moving_average: MovingAverageKind,
    /// Reuse sealed candles between updates.
    pub incremental_candles: bool,
    pub theme: ChartTheme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: 16.0,
            axis_size: (0.0, 32.0),
            base_period: 60_000,
            label_period: 60_000,
            min_clip_width: 1_000,
            price_interval: 0.1,
            price_fallback: 2_200.0,
            zoom_sensitivity: 1_000.0,
            pan_sensitivity: 100.0,
            candle_period: 20_000,
            moving_average: MovingAverageKind::default(),
            incremental_candles: true,
            theme: ChartTheme::default(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_axis_size(mut self, x: f32, y: f32) -> Self {
        self.axis_size = (x, y);
        self
    }

    pub fn with_base_period(mut self, period: i64) -> Self {
        self.base_period = period;
        self
    }

    pub fn with_label_period(mut self, period: i64) -> Self {
        self.label_period = period;
        self
    }

    pub fn with_min_clip_width(mut self, width: i64) -> Self {
        self.min_clip_width = width;
        self
    }

    pub fn with_price_interval(mut self, interval: f64) -> Self {
        self.price_interval = interval;
        self
    }

    pub fn with_zoom_sensitivity(mut self, k: f32) -> Self {
        self.zoom_sensitivity = k;
        self
    }

    pub fn with_pan_sensitivity(mut self, sensitivity: f32) -> Self {
        self.pan_sensitivity = sensitivity;
        self
    }

    pub fn with_candle_period(mut self, period: i64) -> Self {
        self.candle_period = period;
        self
    }

    pub fn with_moving_average(mut self, kind: MovingAverageKind) -> Self {
        self.moving_average = kind;
        self
    }

    pub fn with_incremental_candles(mut self, enabled: bool) -> Self {
        self.incremental_candles = enabled;
        self
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> ChartResult<()> {
        fn invalid(field: &'static str, reason: &str) -> ChartResult<()> {
            Err(ChartError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        }

        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return invalid("margin", "must be a finite non-negative length");
        }
        let (ax, ay) = self.axis_size;
        if !(ax.is_finite() && ay.is_finite() && ax >= 0.0 && ay >= 0.0) {
            return invalid("axis_size", "must be finite non-negative lengths");
        }
        if self.base_period <= 0 {
            return invalid("base_period", "must be positive");
        }
        if self.label_period <= 0 {
            return invalid("label_period", "must be positive");
        }
        if self.min_clip_width <= 0 {
            return invalid("min_clip_width", "must be positive");
        }
        let interval = self.price_interval;
        if !(interval.is_finite() && interval > 0.0 && interval < 1.0) {
            return invalid("price_interval", "must be in (0, 1)");
        }
        if !(self.price_fallback.is_finite() && self.price_fallback > 0.0) {
            return invalid("price_fallback", "must be positive");
        }
        if !(self.zoom_sensitivity.is_finite() && self.zoom_sensitivity > 0.0) {
            return invalid("zoom_sensitivity", "must be positive");
        }
        if !self.pan_sensitivity.is_finite() {
            return invalid("pan_sensitivity", "must be finite");
        }
        if self.candle_period <= 0 {
            return invalid("candle_period", "must be positive");
        }
        match self.moving_average {
            MovingAverageKind::Duration { window } if window <= 0 => {
                invalid("moving_average", "duration window must be positive")
            }
            MovingAverageKind::CandleCount { count, period } if count == 0 || period <= 0 => {
                invalid("moving_average", "count and period must be positive")
            }
            _ => Ok(()),
        }
    }
}
