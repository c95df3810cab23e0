//! Raw tick trace.

use crate::plot::{Plot, PlotContext, PlotKind};
use crate::store::Tick;
use crate::style::StrokeStyle;
use crate::surface::DrawContext;
use glam::Vec2;
use std::any::Any;
use tickscope_core::profiling::profile_function;

/// Polyline through every tick of the visible window.
#[derive(Debug, Clone)]
pub struct LinePlot {
    ticks: Vec<Tick>,
    style: StrokeStyle,
}

impl LinePlot {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            ticks: Vec::new(),
            style,
        }
    }

    /// Ticks cached by the last update.
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }
}

impl Plot for LinePlot {
    fn kind(&self) -> PlotKind {
        PlotKind::Line
    }

    fn update(&mut self, ctx: &PlotContext<'_>) {
        self.ticks.clear();
        self.ticks
            .extend_from_slice(ctx.window.slice(ctx.store.ticks()));
    }

    fn render(&self, ctx: &PlotContext<'_>, canvas: &mut dyn DrawContext) {
        profile_function!();
        let points: Vec<Vec2> = self
            .ticks
            .iter()
            .map(|t| ctx.scales.to_pixel(t.time as f64, t.value))
            .collect();
        canvas.stroke_polyline(&points, &self.style);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
