//! Moving-average trace.

use crate::aggregate::{
    CandleSeries, MovingAverageKind, MovingAveragePoint, candle_moving_average,
    duration_moving_average,
};
use crate::plot::{Plot, PlotContext, PlotKind};
use crate::style::StrokeStyle;
use crate::surface::DrawContext;
use glam::Vec2;
use std::any::Any;
use tickscope_core::profiling::profile_function;
use tracing::trace;

/// Polyline through the moving average of the visible window.
#[derive(Debug, Clone)]
pub struct MovingAveragePlot {
    kind: MovingAverageKind,
    /// Candles for the count-based flavour, with lookback.
    candles: Option<CandleSeries>,
    points: Vec<MovingAveragePoint>,
    style: StrokeStyle,
}

impl MovingAveragePlot {
    pub fn new(kind: MovingAverageKind, incremental: bool, style: StrokeStyle) -> Self {
        let candles = match kind {
            MovingAverageKind::CandleCount { period, .. } => {
                Some(CandleSeries::new(period, incremental))
            }
            MovingAverageKind::Duration { .. } => None,
        };
        Self {
            kind,
            candles,
            points: Vec::new(),
            style,
        }
    }

    pub fn moving_average_kind(&self) -> MovingAverageKind {
        self.kind
    }

    pub fn points(&self) -> &[MovingAveragePoint] {
        &self.points
    }
}

impl Plot for MovingAveragePlot {
    fn kind(&self) -> PlotKind {
        PlotKind::MovingAverage
    }

    fn update(&mut self, ctx: &PlotContext<'_>) {
        let ticks = ctx.store.ticks();
        match (self.kind, self.candles.as_mut()) {
            (MovingAverageKind::Duration { window }, _) => {
                self.points = duration_moving_average(ticks, ctx.window, window);
            }
            (MovingAverageKind::CandleCount { count, period }, Some(series)) => {
                if ctx.store.span() < period {
                    trace!(span = ctx.store.span(), period, "Not enough data for moving average");
                    self.points.clear();
                    return;
                }
                series.update(ticks, ctx.window, count);
                self.points = candle_moving_average(series.candles(), count);
            }
            (MovingAverageKind::CandleCount { .. }, None) => self.points.clear(),
        }
    }

    fn render(&self, ctx: &PlotContext<'_>, canvas: &mut dyn DrawContext) {
        profile_function!();
        let points: Vec<Vec2> = self
            .points
            .iter()
            .map(|p| ctx.scales.to_pixel(p.time as f64, p.average))
            .collect();
        canvas.stroke_polyline(&points, &self.style);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::scale::Scales;
    use crate::store::{SampleStore, Tick};
    use crate::window::VisibleWindow;

    fn update(plot: &mut MovingAveragePlot, store: &SampleStore) {
        let mut scales = Scales::new(&ChartConfig::default());
        scales.layout(400, 300);
        scales.refresh_extrema(store);
        let window = VisibleWindow::new(0, store.len().saturating_sub(1));
        plot.update(&PlotContext {
            store,
            scales: &scales,
            window,
        });
    }

    #[test]
    fn test_under_data_is_empty() {
        let store = SampleStore::from_ticks((0..10).map(|i| Tick::new(i * 1_000, 5.0))).unwrap();
        let mut plot =
            MovingAveragePlot::new(MovingAverageKind::default(), true, StrokeStyle::default());
        update(&mut plot, &store);
        assert!(plot.points().is_empty());
    }

    #[test]
    fn test_count_average_within_closes() {
        let store = SampleStore::from_ticks(
            (0..200).map(|i| Tick::new(i * 1_000, 100.0 + (i % 13) as f64)),
        )
        .unwrap();
        let mut plot =
            MovingAveragePlot::new(MovingAverageKind::default(), true, StrokeStyle::default());
        update(&mut plot, &store);
        assert!(!plot.points().is_empty());
        for p in plot.points() {
            assert!((100.0..=112.0).contains(&p.average));
        }
    }

    #[test]
    fn test_duration_flavour() {
        let store = SampleStore::from_ticks((0..50).map(|i| Tick::new(i * 100, i as f64))).unwrap();
        let mut plot = MovingAveragePlot::new(
            MovingAverageKind::Duration { window: 1_000 },
            true,
            StrokeStyle::default(),
        );
        update(&mut plot, &store);
        assert_eq!(
            plot.moving_average_kind(),
            MovingAverageKind::Duration { window: 1_000 }
        );
        assert_eq!(plot.points().first().map(|p| p.time), Some(1_000));
    }
}
