//! Chart orchestration.
//!
//! [`Chart`] owns the store, the scales, the plots and the interaction
//! controller, and drives them from a host-scheduled loop. Every call to
//! [`Chart::tick`] drains queued view commands, recomputes derived state if
//! something changed, and draws a frame if the derived state changed.

use crate::aggregate::{Candle, MovingAveragePoint};
use crate::config::ChartConfig;
use crate::error::{ChartError, ChartResult};
use crate::flags::{LoopControl, LoopFlags, TickOutcome};
use crate::interaction::{Command, InputEvent, InteractionController};
use crate::plot::{Plot, PlotContext, PlotKind, PlotSlot};
use crate::plots::{CandlePlot, CandleStyle, LinePlot, MovingAveragePlot};
use crate::rect::Rect;
use crate::scale::Scales;
use crate::store::{SampleStore, Tick};
use crate::style::StrokeStyle;
use crate::surface::Surface;
use crate::window::{self, VisibleWindow};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tickscope_core::profiling::{self, profile_function, profile_scope};
use tracing::{debug, info, trace, warn};

/// Counters and timings of the chart loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Calls to [`Chart::tick`].
    pub ticks: u64,
    pub updates: u64,
    pub renders: u64,
    /// Frames dropped because the surface had no context.
    pub skipped_frames: u64,
    pub last_update: Duration,
    pub last_render: Duration,
}

/// A live price chart bound to a drawing surface.
pub struct Chart<S: Surface> {
    surface: S,
    config: ChartConfig,
    store: SampleStore,
    scales: Scales,
    window: VisibleWindow,
    plots: Vec<PlotSlot>,
    controller: InteractionController,
    commands: VecDeque<Command>,
    state: LoopFlags,
    stats: FrameStats,
}

impl<S: Surface> Chart<S> {
    /// Build a chart over `initial` and draw the first frame.
    ///
    /// Fails if the configuration is invalid, the initial ticks are out of
    /// order, or the surface has no drawable context.
    pub fn new(
        mut surface: S,
        initial: impl IntoIterator<Item = Tick>,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        config.validate()?;
        let store = SampleStore::from_ticks(initial)?;

        let (width, height) = surface.size();
        if surface.context().is_none() {
            return Err(ChartError::SurfaceUnavailable { width, height });
        }

        let mut controller =
            InteractionController::new(config.zoom_sensitivity, config.pan_sensitivity);
        controller.set_bounds(Rect::from_size(width, height));

        let mut chart = Self {
            surface,
            scales: Scales::new(&config),
            plots: default_plots(&config),
            config,
            store,
            window: VisibleWindow::default(),
            controller,
            commands: VecDeque::new(),
            state: LoopFlags::SHOULD_UPDATE,
            stats: FrameStats::default(),
        };

        info!(
            width,
            height,
            ticks = chart.store.len(),
            "Chart created"
        );
        chart.tick();
        Ok(chart)
    }

    /// Append a tick. Derived state is recomputed on the next tick.
    pub fn push(&mut self, tick: Tick) -> ChartResult<()> {
        if self.state.is_stopped() {
            return Err(ChartError::Stopped);
        }
        if let Err(err) = self.store.push(tick) {
            warn!(%err, "Rejected tick");
            return Err(err);
        }
        self.state.insert(LoopFlags::SHOULD_UPDATE);
        Ok(())
    }

    /// Stop the loop and detach input. Idempotent.
    pub fn destroy(&mut self) {
        if self.state.is_stopped() {
            return;
        }
        self.state.insert(LoopFlags::SHOULD_STOP);
        self.controller.detach();
        self.commands.clear();
        info!(stats = ?self.stats, "Chart destroyed");
    }

    /// Route host input through the interaction controller.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.controller.handle(event) {
            trace!(?command, "Queued view command");
            self.commands.push_back(command);
            self.state.insert(LoopFlags::SHOULD_UPDATE);
        }
    }

    /// Show or hide a plot.
    pub fn set_active(&mut self, kind: PlotKind, active: bool) {
        let Some(slot) = self.plots.iter_mut().find(|s| s.kind() == kind) else {
            return;
        };
        if slot.active == active {
            return;
        }
        slot.active = active;
        debug!(?kind, active, "Plot visibility changed");
        if active {
            self.state.insert(LoopFlags::SHOULD_UPDATE);
        } else {
            self.state.insert(LoopFlags::SHOULD_RENDER);
        }
    }

    pub fn is_active(&self, kind: PlotKind) -> bool {
        self.plots
            .iter()
            .any(|s| s.kind() == kind && s.active)
    }

    /// Force an update and a render, e.g. after the host resized the surface.
    pub fn invalidate(&mut self) {
        self.state
            .insert(LoopFlags::SHOULD_UPDATE | LoopFlags::SHOULD_RENDER);
    }

    /// Run one loop iteration.
    pub fn tick(&mut self) -> TickOutcome {
        profiling::new_frame();
        profile_function!();
        self.stats.ticks += 1;
        self.apply_commands();

        let updated = self.state.contains(LoopFlags::SHOULD_UPDATE);
        if updated {
            self.update();
        }

        let rendered = self.state.contains(LoopFlags::SHOULD_RENDER) && self.render();

        let control = if self.state.is_stopped() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        };

        TickOutcome {
            updated,
            rendered,
            control,
        }
    }

    fn apply_commands(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::Zoom(delta) => self.scales.apply_zoom(delta),
                Command::Pan(delta) => self.scales.apply_pan(delta),
                Command::ResetView => self.scales.reset_view(),
            }
        }
    }

    fn update(&mut self) {
        profile_scope!("chart_update");
        let start = Instant::now();

        let (width, height) = self.surface.size();
        self.scales.layout(width, height);
        self.controller.set_bounds(Rect::from_size(width, height));
        self.scales.refresh_extrema(&self.store);
        self.window = window::locate(
            self.store.ticks(),
            self.scales.clip_base(),
            self.scales.clip_max(),
        );

        let ctx = PlotContext {
            store: &self.store,
            scales: &self.scales,
            window: self.window,
        };
        for slot in self.plots.iter_mut().filter(|s| s.active) {
            slot.plot.update(&ctx);
        }

        self.state.remove(LoopFlags::SHOULD_UPDATE);
        self.state.insert(LoopFlags::SHOULD_RENDER);
        self.stats.updates += 1;
        self.stats.last_update = start.elapsed();

        debug!(
            t1 = self.window.t1,
            t2 = self.window.t2,
            clip_base = self.scales.clip_base(),
            clip_max = self.scales.clip_max(),
            zoom = self.scales.time.zoom,
            "Chart updated"
        );
    }

    /// Draw a frame. Returns false if the surface had no context.
    fn render(&mut self) -> bool {
        profile_scope!("chart_render");
        let start = Instant::now();

        let Some(canvas) = self.surface.context() else {
            self.stats.skipped_frames += 1;
            warn!("Surface context unavailable, skipping frame");
            return false;
        };

        let theme = &self.config.theme;
        canvas.clear(theme.background);
        self.scales.draw(canvas, theme);

        if self.store.len() >= 2 {
            let ctx = PlotContext {
                store: &self.store,
                scales: &self.scales,
                window: self.window,
            };
            canvas.push_clip(self.scales.plot_rect());
            for slot in self.plots.iter().filter(|s| s.active) {
                slot.plot.render(&ctx, canvas);
            }
            canvas.pop_clip();
        }

        self.state.remove(LoopFlags::SHOULD_RENDER);
        self.stats.renders += 1;
        self.stats.last_render = start.elapsed();
        trace!(elapsed = ?self.stats.last_render, "Chart rendered");
        true
    }

    /// First plot of type `T`, if any.
    pub fn plot<T: Plot>(&self) -> Option<&T> {
        self.plots
            .iter()
            .find_map(|s| s.plot.as_any().downcast_ref::<T>())
    }

    /// Candles as of the last update.
    pub fn candles(&self) -> &[Candle] {
        self.plot::<CandlePlot>()
            .map(CandlePlot::candles)
            .unwrap_or_default()
    }

    /// Moving-average points as of the last update.
    pub fn moving_average(&self) -> &[MovingAveragePoint] {
        self.plot::<MovingAveragePlot>()
            .map(MovingAveragePlot::points)
            .unwrap_or_default()
    }

    pub fn plots(&self) -> &[PlotSlot] {
        &self.plots
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access. Call [`invalidate`](Self::invalidate) after resizing.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> LoopFlags {
        self.state
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn is_stopped(&self) -> bool {
        self.state.is_stopped()
    }

    /// Commands waiting for the next tick.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    pub fn is_grabbing(&self) -> bool {
        self.controller.is_grabbing()
    }
}

impl<S: Surface> std::fmt::Debug for Chart<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("ticks", &self.store.len())
            .field("window", &self.window)
            .field("plots", &self.plots)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn default_plots(config: &ChartConfig) -> Vec<PlotSlot> {
    let theme = &config.theme;
    let mut plots = vec![
        PlotSlot::new(Box::new(LinePlot::new(StrokeStyle::solid(
            theme.line,
            theme.line_width,
        )))),
        PlotSlot::new(Box::new(CandlePlot::new(
            config.candle_period,
            config.incremental_candles,
            CandleStyle::from_theme(theme),
        ))),
        PlotSlot::new(Box::new(MovingAveragePlot::new(
            config.moving_average,
            config.incremental_candles,
            StrokeStyle::solid(theme.moving_average, theme.moving_average_width),
        ))),
    ];
    plots.sort_by_key(|s| s.kind());
    plots
}
