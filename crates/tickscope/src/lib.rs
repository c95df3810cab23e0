//! Tickscope - a live, pannable, zoomable price chart engine.
//!
//! The engine keeps an append-only store of ticks, maps them onto a pixel
//! surface through a sliding time clip, and overlays three plots on one
//! coordinate system: the raw trace, periodic OHLC candles and a moving
//! average. Drawing goes through the [`Surface`] / [`DrawContext`] traits, so
//! the host decides what pixels end up where.
//!
//! # Quick Start
//!
//! ```
//! use tickscope::{Chart, ChartConfig, DrawListSurface, LoopControl, Tick};
//!
//! let ticks = (0..120).map(|i| Tick::new(i * 1_000, 2_000.0 + i as f64));
//! let mut chart = Chart::new(DrawListSurface::new(800, 600), ticks, ChartConfig::default())?;
//!
//! chart.push(Tick::new(120_000, 2_121.0))?;
//! let outcome = chart.tick();
//! assert!(outcome.rendered);
//!
//! chart.destroy();
//! assert_eq!(chart.tick().control, LoopControl::Stop);
//! # Ok::<(), tickscope::ChartError>(())
//! ```
//!
//! # Driving the loop
//!
//! The host calls [`Chart::tick`] once per display refresh and forwards
//! input through [`Chart::handle_input`]. Pushes and gestures only mark
//! state dirty; all recomputation happens inside `tick`.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod flags;
pub mod interaction;
pub mod plot;
pub mod plots;
pub mod rect;
pub mod scale;
pub mod store;
pub mod style;
pub mod surface;
pub mod window;

pub use aggregate::{Candle, CandleSeries, MovingAverageKind, MovingAveragePoint};
pub use chart::{Chart, FrameStats};
pub use config::ChartConfig;
pub use error::{ChartError, ChartResult};
pub use flags::{LoopControl, LoopFlags, TickOutcome};
pub use interaction::{Command, InputEvent, InteractionController, PointerButton};
#[cfg(feature = "winit")]
pub use interaction::WinitInputAdapter;
pub use plot::{Plot, PlotContext, PlotKind, PlotSlot};
pub use plots::{CandlePlot, CandleStyle, LinePlot, MovingAveragePlot};
pub use rect::Rect;
pub use scale::{AxisLine, PriceAxis, Scales, TimeAxis};
pub use store::{SampleStore, Tick};
pub use style::{ChartTheme, DashPattern, StrokeStyle, TextAlign, TextStyle};
pub use surface::{DrawCommand, DrawContext, DrawList, DrawListSurface, RasterSurface, Surface};
pub use window::VisibleWindow;

pub use glam::Vec2;
pub use tickscope_core::Color;
