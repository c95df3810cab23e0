//! Headless live chart rendered to PNG frames
//!
//! This example demonstrates:
//! - Streaming ticks into a chart driven by a fixed-rate loop
//! - Zooming out with the wheel and panning with a drag
//! - Rasterizing frames with `RasterSurface` and saving them as PNGs
//!
//! Run with: cargo run -p tickscope --features png --example render_frames -- [output-dir]

use std::path::PathBuf;
use tickscope::{
    Chart, ChartConfig, ChartTheme, InputEvent, LoopControl, PointerButton, RasterSurface, Vec2,
};
use tickscope_core::logging;
use tickscope_core::profiling::{ProfilingBackend, init_profiling};
use tickscope_test_utils::generators::GbmTicks;

/// Ticks pushed between two rendered frames.
const TICKS_PER_FRAME: usize = 25;

/// Frames written to disk.
const FRAMES: usize = 12;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/tickscope-frames"));
    std::fs::create_dir_all(&out_dir)?;

    let mut feed = GbmTicks::new(12_345, 1_700_000_000_000, 2_000.0, 400, usize::MAX)
        .with_drift(0.000_05)
        .with_volatility(0.003);

    let initial: Vec<_> = feed.by_ref().take(300).collect();
    let config = ChartConfig::default().with_theme(ChartTheme::dark());
    let mut chart = Chart::new(RasterSurface::new(1_024, 576), initial, config)?;

    for frame in 0..FRAMES {
        for tick in feed.by_ref().take(TICKS_PER_FRAME) {
            chart.push(tick)?;
        }

        match frame {
            4 => chart.handle_input(InputEvent::Wheel { delta_y: 1_500.0 }),
            8 => {
                chart.handle_input(InputEvent::PointerPressed {
                    position: Vec2::new(512.0, 288.0),
                    button: PointerButton::Primary,
                });
                chart.handle_input(InputEvent::PointerMoved {
                    position: Vec2::new(712.0, 288.0),
                });
                chart.handle_input(InputEvent::PointerReleased {
                    button: PointerButton::Primary,
                });
            }
            _ => {}
        }

        let outcome = chart.tick();
        if outcome.control == LoopControl::Stop {
            break;
        }

        let path = out_dir.join(format!("frame_{frame:03}.png"));
        chart.surface().save_png(&path)?;
        tracing::info!(
            path = %path.display(),
            candles = chart.candles().len(),
            labels = chart.surface().texts().len(),
            "Wrote frame"
        );
    }

    chart.destroy();
    tracing::info!(stats = ?chart.stats(), "Done");
    Ok(())
}
