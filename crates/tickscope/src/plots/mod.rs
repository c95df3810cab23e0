//! Built-in plots.

mod candle;
mod line;
mod moving_average;

pub use candle::{CandlePlot, CandleStyle};
pub use line::LinePlot;
pub use moving_average::MovingAveragePlot;
