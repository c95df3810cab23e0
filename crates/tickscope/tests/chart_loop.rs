//! Loop scheduling, interaction and lifecycle tests (no real surface required).

use tickscope::{
    Chart, ChartConfig, ChartError, InputEvent, LoopControl, LoopFlags, PlotKind, PointerButton,
    RasterSurface, Tick, Vec2,
};
use tickscope_core::logging;
use tickscope_test_utils::{MockSurface, generators};

fn streaming_chart() -> (Chart<MockSurface>, MockSurface) {
    logging::init_for_tests();
    let surface = MockSurface::new(800, 600);
    let probe = surface.clone();
    let chart = Chart::new(
        surface,
        generators::linear(120, 1_000, 2_000.0, 0.5),
        ChartConfig::default(),
    )
    .unwrap();
    (chart, probe)
}

#[test]
fn test_construction_fails_without_context() {
    let result = Chart::new(
        MockSurface::unavailable(640, 480),
        generators::linear(5, 1_000, 1.0, 1.0),
        ChartConfig::default(),
    );
    assert!(matches!(
        result,
        Err(ChartError::SurfaceUnavailable {
            width: 640,
            height: 480
        })
    ));
}

#[test]
fn test_construction_rejects_bad_input() {
    let unordered = vec![Tick::new(10, 1.0), Tick::new(5, 1.0)];
    assert!(matches!(
        Chart::new(MockSurface::new(10, 10), unordered, ChartConfig::default()),
        Err(ChartError::OutOfOrder { last: 10, got: 5 })
    ));

    let config = ChartConfig::default().with_label_period(-1);
    assert!(matches!(
        Chart::new(MockSurface::new(10, 10), Vec::<Tick>::new(), config),
        Err(ChartError::InvalidConfig {
            field: "label_period",
            ..
        })
    ));
}

#[test]
fn test_idle_ticks_do_nothing() {
    let (mut chart, probe) = streaming_chart();
    let frames = probe.frame_count();
    for _ in 0..5 {
        let outcome = chart.tick();
        assert!(!outcome.updated && !outcome.rendered);
        assert_eq!(outcome.control, LoopControl::Continue);
    }
    assert_eq!(probe.frame_count(), frames);
    assert_eq!(chart.stats().ticks, 6);
}

#[test]
fn test_many_pushes_coalesce_into_one_update() {
    let (mut chart, probe) = streaming_chart();
    for i in 120..130 {
        chart.push(Tick::new(i * 1_000, 2_100.0)).unwrap();
    }
    assert_eq!(chart.state(), LoopFlags::SHOULD_UPDATE);
    chart.tick();
    assert_eq!(chart.stats().updates, 2);
    assert_eq!(probe.frame_count(), 2);
    assert_eq!(chart.window().t2, 129);
}

#[test]
fn test_skipped_frame_keeps_render_owed() {
    let (mut chart, probe) = streaming_chart();
    chart.push(Tick::new(200_000, 2_050.0)).unwrap();
    probe.set_available(false);

    let outcome = chart.tick();
    assert!(outcome.updated);
    assert!(!outcome.rendered);
    assert_eq!(chart.state(), LoopFlags::SHOULD_RENDER);
    assert_eq!(chart.stats().skipped_frames, 1);

    probe.set_available(true);
    let outcome = chart.tick();
    assert!(!outcome.updated && outcome.rendered);
    assert!(chart.state().is_empty());
}

#[test]
fn test_resize_relayouts_on_invalidate() {
    let (mut chart, probe) = streaming_chart();
    probe.resize(400, 300);
    chart.invalidate();
    chart.tick();
    assert_eq!(chart.scales().time.line.x2, 384.0);
    assert_eq!(chart.scales().time.line.y1, 252.0);
}

#[test]
fn test_drag_pans_view_into_the_past() {
    let (mut chart, _probe) = streaming_chart();
    let clip_max = chart.scales().clip_max();

    chart.handle_input(InputEvent::PointerPressed {
        position: Vec2::new(400.0, 300.0),
        button: PointerButton::Primary,
    });
    assert!(chart.is_grabbing());
    chart.handle_input(InputEvent::PointerMoved {
        position: Vec2::new(420.0, 300.0),
    });
    chart.handle_input(InputEvent::PointerReleased {
        button: PointerButton::Primary,
    });
    chart.tick();

    assert!((chart.scales().clip_max() - (clip_max - 2_000.0)).abs() < 1e-6);
    assert!(!chart.is_grabbing());

    chart.handle_input(InputEvent::ResetView);
    chart.tick();
    assert_eq!(chart.scales().clip_max(), clip_max);
}

#[test]
fn test_press_outside_surface_does_not_grab() {
    let (mut chart, _probe) = streaming_chart();
    chart.handle_input(InputEvent::PointerPressed {
        position: Vec2::new(900.0, 300.0),
        button: PointerButton::Primary,
    });
    assert!(!chart.is_grabbing());
    assert!(chart.state().is_empty());
}

#[test]
fn test_destroy_detaches_input() {
    let (mut chart, _probe) = streaming_chart();
    chart.handle_input(InputEvent::Wheel { delta_y: 250.0 });
    chart.destroy();
    assert_eq!(chart.pending_commands(), 0);

    chart.handle_input(InputEvent::Wheel { delta_y: 250.0 });
    assert_eq!(chart.pending_commands(), 0);

    let outcome = chart.tick();
    assert_eq!(outcome.control, LoopControl::Stop);
    assert_eq!(chart.scales().time.zoom, 0.0);
    assert_eq!(chart.push(Tick::new(500_000, 1.0)), Err(ChartError::Stopped));
}

#[test]
fn test_inactive_plot_keeps_cache() {
    let (mut chart, _probe) = streaming_chart();
    let candles = chart.candles().to_vec();
    assert!(!candles.is_empty());

    chart.set_active(PlotKind::Candle, false);
    chart.push(Tick::new(120_000, 5_000.0)).unwrap();
    chart.tick();
    assert_eq!(chart.candles(), candles.as_slice());

    chart.set_active(PlotKind::Candle, true);
    chart.tick();
    assert_ne!(chart.candles(), candles.as_slice());
}

#[test]
fn test_raster_backend_draws_pixels() {
    let mut chart = Chart::new(
        RasterSurface::new(320, 200),
        generators::linear(90, 1_000, 50.0, 0.25),
        ChartConfig::default(),
    )
    .unwrap();
    chart.tick();

    let surface = chart.surface();
    assert_eq!(surface.pixel(0, 0), Some([255, 255, 255, 255]));
    let bottom_axis_y = chart.scales().time.line.y1 as u32;
    assert_ne!(surface.pixel(160, bottom_axis_y), Some([255, 255, 255, 255]));
    assert!(!surface.texts().is_empty());
}

#[test]
fn test_raster_frame_with_data_gap_stays_cheap() {
    let ticks = vec![
        Tick::new(0, 10.0),
        Tick::new(86_400_000, 11.0),
        Tick::new(86_401_000, 12.0),
    ];
    let start = std::time::Instant::now();
    let chart = Chart::new(RasterSurface::new(800, 600), ticks, ChartConfig::default()).unwrap();
    assert!(start.elapsed() < std::time::Duration::from_secs(2));
    assert_eq!(chart.window(), tickscope::VisibleWindow::new(0, 2));
    assert_eq!(chart.stats().renders, 1);
}
