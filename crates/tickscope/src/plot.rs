//! Plot pipeline.
//!
//! Each plot derives its own data from a read-only [`PlotContext`] during
//! update and draws that cached data during render.

use crate::scale::Scales;
use crate::store::SampleStore;
use crate::surface::DrawContext;
use crate::window::VisibleWindow;
use std::any::Any;

/// The plots a chart can show, in layer order (bottom first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlotKind {
    Line,
    Candle,
    MovingAverage,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [PlotKind::Line, PlotKind::Candle, PlotKind::MovingAverage];
}

/// Snapshot of chart state handed to plots.
#[derive(Debug, Clone, Copy)]
pub struct PlotContext<'a> {
    pub store: &'a SampleStore,
    pub scales: &'a Scales,
    pub window: VisibleWindow,
}

/// A layer of the chart.
pub trait Plot: Any {
    fn kind(&self) -> PlotKind;

    /// Recompute derived data for the current window.
    fn update(&mut self, ctx: &PlotContext<'_>);

    /// Draw the cached data. Called inside the plot clip.
    fn render(&self, ctx: &PlotContext<'_>, canvas: &mut dyn DrawContext);

    fn as_any(&self) -> &dyn Any;
}

/// A plot plus its visibility.
pub struct PlotSlot {
    pub plot: Box<dyn Plot>,
    pub active: bool,
}

impl PlotSlot {
    pub fn new(plot: Box<dyn Plot>) -> Self {
        Self { plot, active: true }
    }

    pub fn kind(&self) -> PlotKind {
        self.plot.kind()
    }
}

impl std::fmt::Debug for PlotSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotSlot")
            .field("kind", &self.kind())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_order() {
        let mut kinds = vec![PlotKind::MovingAverage, PlotKind::Line, PlotKind::Candle];
        kinds.sort();
        assert_eq!(kinds, PlotKind::ALL);
    }
}
