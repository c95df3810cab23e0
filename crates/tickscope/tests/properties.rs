//! Invariants of the window locator, aggregation and scales over generated data.

use tickscope::aggregate::{
    bucket_anchor, bucket_start, build_candles, candle_moving_average, candle_range,
    duration_moving_average,
};
use tickscope::window::{locate, nearest_index};
use tickscope::{Chart, ChartConfig, MovingAverageKind, SampleStore, Scales, Tick, VisibleWindow};
use tickscope_test_utils::MockSurface;
use tickscope_test_utils::generators::{GbmTicks, from_times};

fn gbm(count: usize) -> Vec<Tick> {
    GbmTicks::new(12_345, 1_700_000_000_000, 2_000.0, 350, count)
        .with_volatility(0.01)
        .collect()
}

#[test]
fn test_window_monotonic_in_clip() {
    let ticks = gbm(2_000);
    let first = ticks[0].time as f64;
    let mut previous = VisibleWindow::default();

    for step in 0..400 {
        let clip_max = first + step as f64 * 1_750.0;
        let window = locate(&ticks, clip_max - 60_000.0, clip_max);
        assert!(window.t1 <= window.t2);
        assert!(window.t1 >= previous.t1 && window.t2 >= previous.t2);
        previous = window;
    }
}

#[test]
fn test_window_brackets_clip() {
    let ticks = gbm(500);
    let last = ticks.len() - 1;
    for clip_base in [ticks[10].time as f64 + 17.0, ticks[200].time as f64, -1.0] {
        let clip_max = clip_base + 20_000.0;
        let w = locate(&ticks, clip_base, clip_max);
        assert!(w.t1 == 0 || ticks[w.t1].time as f64 <= clip_base);
        assert!(w.t2 == last || ticks[w.t2].time as f64 >= clip_max);
    }
}

#[test]
fn test_nearest_with_duplicates_and_gaps() {
    let ticks = from_times(&[0, 0, 5, 5, 5, 100, 1_000], &[1.0]);
    assert_eq!(nearest_index(&ticks, 0.0), 0);
    assert_eq!(nearest_index(&ticks, 5.0), 2);
    assert_eq!(nearest_index(&ticks, 52.0), 4);
    assert_eq!(nearest_index(&ticks, 53.0), 5);
    assert_eq!(nearest_index(&ticks, 550.0), 5);
}

#[test]
fn test_candles_partition_window() {
    let ticks = gbm(3_000);
    let period = 20_000;
    let anchor = bucket_anchor(ticks[0].time, period);
    let window = locate(&ticks, ticks[900].time as f64, ticks[2_100].time as f64);
    let range = candle_range(&ticks, window, anchor, period, 0);
    let candles = build_candles(&ticks, range.clone(), anchor, period);

    let covered = &ticks[range.clone()];
    let mut i = 0;
    for candle in &candles {
        assert!(candle.low <= candle.open.min(candle.close));
        assert!(candle.high >= candle.open.max(candle.close));

        let members: Vec<&Tick> = covered[i..]
            .iter()
            .take_while(|t| bucket_start(anchor, period, t.time) == candle.time)
            .collect();
        assert!(!members.is_empty());
        assert_eq!(candle.open, members[0].value);
        assert_eq!(candle.close, members[members.len() - 1].value);
        let high = members.iter().map(|t| t.value).fold(f64::MIN, f64::max);
        let low = members.iter().map(|t| t.value).fold(f64::MAX, f64::min);
        assert_eq!(candle.high, high);
        assert_eq!(candle.low, low);
        i += members.len();
    }
    assert_eq!(i, covered.len());
    assert!(candles.windows(2).all(|w| w[1].time - w[0].time >= period));
}

#[test]
fn test_moving_averages_within_bounds() {
    let ticks = gbm(2_000);
    let window = VisibleWindow::new(0, ticks.len() - 1);

    let duration = 10_000;
    for point in duration_moving_average(&ticks, window, duration) {
        let span: Vec<f64> = ticks
            .iter()
            .filter(|t| t.time >= point.time - duration && t.time <= point.time)
            .map(|t| t.value)
            .collect();
        let lo = span.iter().copied().fold(f64::MAX, f64::min);
        let hi = span.iter().copied().fold(f64::MIN, f64::max);
        assert!(point.average >= lo - 1e-9 && point.average <= hi + 1e-9);
    }

    let anchor = bucket_anchor(ticks[0].time, 20_000);
    let candles = build_candles(&ticks, 0..ticks.len(), anchor, 20_000);
    let points = candle_moving_average(&candles, 5);
    assert_eq!(points.len(), candles.len() - 4);
    for (i, point) in points.iter().enumerate() {
        let closes = candles[i..i + 5].iter().map(|c| c.close);
        let lo = closes.clone().fold(f64::MAX, f64::min);
        let hi = closes.fold(f64::MIN, f64::max);
        assert!(point.average >= lo - 1e-9 && point.average <= hi + 1e-9);
    }
}

#[test]
fn test_scales_monotonic_and_invertible() {
    let store = SampleStore::from_ticks(gbm(400)).unwrap();
    let mut scales = Scales::new(&ChartConfig::default());
    scales.layout(1_024, 768);
    scales.refresh_extrema(&store);
    scales.apply_zoom(0.75);
    scales.apply_pan(-3_000.0);

    let base = scales.clip_base();
    let mut last_x = f32::MIN;
    for i in 0..50 {
        let t = base + i as f64 * 2_000.0;
        let x = scales.pixel_for_date(t);
        assert!(x > last_x);
        last_x = x;
        assert!((scales.date_for_pixel(x) - t).abs() < 5.0);
    }

    let mut last_y = f32::MAX;
    for i in 0..50 {
        let p = i as f64 * 50.0;
        let y = scales.pixel_for_price(p);
        assert!(y < last_y);
        last_y = y;
    }
}

#[test]
fn test_incremental_candles_match_full_recompute() {
    let ticks = gbm(1_500);
    let (head, tail) = ticks.split_at(200);

    let config = ChartConfig::default().with_candle_period(5_000);
    let mut fast = Chart::new(MockSurface::new(800, 600), head.to_vec(), config.clone()).unwrap();
    let mut slow = Chart::new(
        MockSurface::new(800, 600),
        head.to_vec(),
        config.with_incremental_candles(false),
    )
    .unwrap();

    for tick in tail {
        fast.push(*tick).unwrap();
        slow.push(*tick).unwrap();
        fast.tick();
        slow.tick();
        assert_eq!(fast.candles(), slow.candles());
        assert_eq!(fast.moving_average(), slow.moving_average());
    }
}

#[test]
fn test_update_is_idempotent() {
    let surface = MockSurface::new(800, 600);
    let probe = surface.clone();
    let config =
        ChartConfig::default().with_moving_average(MovingAverageKind::Duration { window: 5_000 });
    let mut chart = Chart::new(surface, gbm(600), config).unwrap();

    let candles = chart.candles().to_vec();
    let average = chart.moving_average().to_vec();
    let frame = probe.last_frame();

    chart.invalidate();
    chart.tick();

    assert_eq!(chart.candles(), candles.as_slice());
    assert_eq!(chart.moving_average(), average.as_slice());
    assert_eq!(probe.last_frame(), frame);
}
