//! End-to-end chart scenarios driven through a recording surface.

use tickscope::{Chart, ChartConfig, ChartTheme, DrawCommand, InputEvent, Tick};
use tickscope_test_utils::{MockSurface, generators};

fn chart_with(ticks: Vec<Tick>, config: ChartConfig) -> (Chart<MockSurface>, MockSurface) {
    let surface = MockSurface::new(800, 600);
    let probe = surface.clone();
    let chart = Chart::new(surface, ticks, config).unwrap();
    (chart, probe)
}

#[test]
fn test_single_tick_draws_background_and_axes_only() {
    let (chart, probe) = chart_with(vec![Tick::new(0, 100.0)], ChartConfig::default());
    let theme = ChartTheme::default();

    let frame = probe.last_frame();
    assert_eq!(frame.first(), Some(&DrawCommand::Clear(theme.background)));
    assert_eq!(probe.count_fill_rects(), 0);
    assert_eq!(probe.count_polylines_with_color(theme.line), 0);
    assert_eq!(probe.count_polylines_with_color(theme.moving_average), 0);
    assert!(!frame.contains(&DrawCommand::PushClip(chart.scales().plot_rect())));
    assert!(probe.count_polylines_with_color(theme.axis) >= 2);
    assert!(probe.clips_balanced());
}

#[test]
fn test_empty_store_draws_frame() {
    let (chart, probe) = chart_with(Vec::new(), ChartConfig::default());
    assert_eq!(probe.frame_count(), 1);
    assert_eq!(chart.window().t1, 0);
    assert_eq!(chart.window().t2, 0);
}

#[test]
fn test_four_candles_of_five_ticks() {
    let config = ChartConfig::default().with_candle_period(5_000);
    let (chart, _probe) = chart_with(generators::linear(20, 1_000, 100.0, 1.0), config);

    let times: Vec<i64> = chart.candles().iter().map(|c| c.time).collect();
    assert_eq!(times, vec![0, 5_000, 10_000, 15_000]);

    for (i, candle) in chart.candles().iter().enumerate() {
        let first = 100.0 + (i * 5) as f64;
        assert_eq!(candle.open, first);
        assert_eq!(candle.low, first);
        assert_eq!(candle.close, first + 4.0);
        assert_eq!(candle.high, first + 4.0);
    }
}

#[test]
fn test_window_end_never_decreases_while_streaming() {
    let (mut chart, _probe) = chart_with(vec![Tick::new(0, 50.0)], ChartConfig::default());
    let mut last_t2 = chart.window().t2;

    for i in 1..=100 {
        chart.push(Tick::new(i * 200, 50.0 + (i % 9) as f64)).unwrap();
        chart.tick();
        let t2 = chart.window().t2;
        assert!(t2 >= last_t2, "t2 went from {} to {}", last_t2, t2);
        last_t2 = t2;
    }
    assert_eq!(last_t2, 100);
}

#[test]
fn test_zoom_out_then_in_round_trips() {
    let ticks = generators::linear(100, 1_000, 10.0, 0.1);
    let (mut chart, _probe) = chart_with(ticks, ChartConfig::default());
    let unzoomed = chart.scales().time.clip_width();

    chart.handle_input(InputEvent::Wheel { delta_y: 500.0 });
    chart.tick();
    assert!((chart.scales().time.clip_width() - unzoomed * 1.5).abs() < 1e-6);

    chart.handle_input(InputEvent::Wheel { delta_y: -500.0 });
    chart.tick();
    assert!((chart.scales().time.clip_width() - unzoomed).abs() < 1e-6);
}

#[test]
fn test_zoom_round_trips_within_one_tick() {
    let ticks = generators::linear(100, 1_000, 10.0, 0.1);
    let (mut chart, _probe) = chart_with(ticks, ChartConfig::default());
    let unzoomed = chart.scales().time.clip_width();

    chart.handle_input(InputEvent::Wheel { delta_y: 500.0 });
    chart.handle_input(InputEvent::Wheel { delta_y: -500.0 });
    assert_eq!(chart.pending_commands(), 2);
    chart.tick();

    assert_eq!(chart.pending_commands(), 0);
    assert!((chart.scales().time.clip_width() - unzoomed).abs() < 1e-6);
}
