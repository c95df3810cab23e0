//! OHLC candles.

use crate::aggregate::{Candle, CandleSeries};
use crate::plot::{Plot, PlotContext, PlotKind};
use crate::rect::Rect;
use crate::style::{ChartTheme, StrokeStyle};
use crate::surface::DrawContext;
use glam::Vec2;
use std::any::Any;
use tickscope_core::Color;
use tickscope_core::profiling::{profile_function, profile_scope};

/// Body width as a fraction of the period, per side of the bucket start.
const BODY_HALF_WIDTH: f64 = 0.4;

/// Colors for candle bodies and wicks.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleStyle {
    pub bullish: Color,
    pub bearish: Color,
    pub neutral: Color,
    pub wick_width: f32,
}

impl CandleStyle {
    pub fn from_theme(theme: &ChartTheme) -> Self {
        Self {
            bullish: theme.bullish,
            bearish: theme.bearish,
            neutral: theme.neutral,
            wick_width: theme.wick_width,
        }
    }

    fn color_for(&self, candle: &Candle) -> Color {
        if candle.is_bearish() {
            self.bearish
        } else if candle.is_bullish() {
            self.bullish
        } else {
            self.neutral
        }
    }
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self::from_theme(&ChartTheme::default())
    }
}

/// Periodic candles over the padded visible window.
#[derive(Debug, Clone)]
pub struct CandlePlot {
    series: CandleSeries,
    style: CandleStyle,
}

impl CandlePlot {
    pub fn new(period: i64, incremental: bool, style: CandleStyle) -> Self {
        Self {
            series: CandleSeries::new(period, incremental),
            style,
        }
    }

    pub fn period(&self) -> i64 {
        self.series.period()
    }

    pub fn candles(&self) -> &[Candle] {
        self.series.candles()
    }
}

impl Plot for CandlePlot {
    fn kind(&self) -> PlotKind {
        PlotKind::Candle
    }

    fn update(&mut self, ctx: &PlotContext<'_>) {
        self.series.update(ctx.store.ticks(), ctx.window, 0);
    }

    fn render(&self, ctx: &PlotContext<'_>, canvas: &mut dyn DrawContext) {
        profile_function!();
        let scales = ctx.scales;
        let period = self.series.period() as f64;
        let gap = period * BODY_HALF_WIDTH;

        for candle in self.series.candles() {
            profile_scope!("candle");
            let center = candle.time as f64;
            let x1 = scales.pixel_for_date(center - gap);
            let x2 = scales.pixel_for_date(center + gap);
            let xm = (x1 + x2) / 2.0;
            let open = scales.pixel_for_price(candle.open);
            let close = scales.pixel_for_price(candle.close);
            let color = self.style.color_for(candle);

            if candle.open == candle.close {
                canvas.stroke_line(
                    Vec2::new(x1, open),
                    Vec2::new(x2, open),
                    &StrokeStyle::solid(color, self.style.wick_width),
                );
            } else {
                let top = open.min(close);
                let height = (open - close).abs().max(1.0);
                canvas.fill_rect(Rect::new(x1, top, x2 - x1, height), color);
            }

            canvas.stroke_line(
                Vec2::new(xm, scales.pixel_for_price(candle.high)),
                Vec2::new(xm, scales.pixel_for_price(candle.low)),
                &StrokeStyle::solid(color, self.style.wick_width),
            );
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
