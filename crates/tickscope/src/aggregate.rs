//! Candle and moving-average aggregation.
//!
//! Candles bucket ticks into fixed periods anchored on the first tick of
//! the store. Only the visible window (padded to whole buckets, plus an
//! optional lookback) is aggregated.

use crate::store::Tick;
use crate::window::VisibleWindow;
use std::ops::Range;
use tickscope_core::profiling::profile_function;

/// Open/high/low/close summary of one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Bucket start.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Open a candle on the first tick of a bucket.
    pub fn open_at(bucket: i64, value: f64) -> Self {
        Self {
            time: bucket,
            open: value,
            high: value,
            low: value,
            close: value,
        }
    }

    /// Fold a later tick of the same bucket.
    pub fn fold(&mut self, value: f64) {
        self.high = self.high.max(value);
        self.low = self.low.min(value);
        self.close = value;
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Origin of the bucket grid for a store whose first tick is at `first`.
pub fn bucket_anchor(first: i64, period: i64) -> i64 {
    first - period + first.rem_euclid(period)
}

/// Start of the bucket containing `t`.
pub fn bucket_start(anchor: i64, period: i64, t: i64) -> i64 {
    anchor + period * (t - anchor).div_euclid(period)
}

/// Half-open tick range covering every bucket the window touches, plus
/// `lookback` whole buckets to its left.
pub fn candle_range(
    ticks: &[Tick],
    window: VisibleWindow,
    anchor: i64,
    period: i64,
    lookback: usize,
) -> Range<usize> {
    if ticks.is_empty() {
        return 0..0;
    }
    let last = ticks.len() - 1;
    let t1 = window.t1.min(last);
    let t2 = window.t2.min(last);

    let lookback_span = period.saturating_mul(lookback as i64);
    let first_bucket = bucket_start(anchor, period, ticks[t1].time).saturating_sub(lookback_span);
    let end_bucket = bucket_start(anchor, period, ticks[t2].time).saturating_add(period);

    let start = ticks.partition_point(|t| t.time < first_bucket);
    let end = ticks.partition_point(|t| t.time < end_bucket);
    start..end
}

/// Full recomputation of the candles over `ticks[range]`.
pub fn build_candles(ticks: &[Tick], range: Range<usize>, anchor: i64, period: i64) -> Vec<Candle> {
    profile_function!();
    let mut candles = Vec::new();
    fold_candles(&mut candles, ticks.get(range).unwrap_or(&[]), anchor, period);
    candles
}

fn fold_candles(candles: &mut Vec<Candle>, ticks: &[Tick], anchor: i64, period: i64) {
    for tick in ticks {
        let bucket = bucket_start(anchor, period, tick.time);
        match candles.last_mut() {
            Some(candle) if candle.time == bucket => candle.fold(tick.value),
            _ => candles.push(Candle::open_at(bucket, tick.value)),
        }
    }
}

/// Candles for a sliding window, reusing sealed candles between updates.
///
/// When the new tick range starts where the cached one did and ends at or
/// after it, every candle but the last is kept and only the last bucket
/// onward is refolded. Otherwise the series is rebuilt.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    period: i64,
    incremental: bool,
    anchor: i64,
    range: Range<usize>,
    candles: Vec<Candle>,
    reused: usize,
}

impl CandleSeries {
    pub fn new(period: i64, incremental: bool) -> Self {
        Self {
            period,
            incremental,
            anchor: 0,
            range: 0..0,
            candles: Vec::new(),
            reused: 0,
        }
    }

    pub fn period(&self) -> i64 {
        self.period
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Tick range the candles were built from.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Candles carried over unchanged by the last update.
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Drop the cache.
    pub fn clear(&mut self) {
        self.candles.clear();
        self.range = 0..0;
        self.reused = 0;
    }

    /// Bring the series in line with `window`.
    pub fn update(&mut self, ticks: &[Tick], window: VisibleWindow, lookback: usize) {
        profile_function!();
        let Some(first) = ticks.first() else {
            self.clear();
            return;
        };

        let anchor = bucket_anchor(first.time, self.period);
        let range = candle_range(ticks, window, anchor, self.period, lookback);

        let extends = self.incremental
            && anchor == self.anchor
            && range.start == self.range.start
            && range.end >= self.range.end
            && !self.candles.is_empty();

        if extends && let Some(open) = self.candles.pop() {
            let from = ticks[range.clone()].partition_point(|t| t.time < open.time) + range.start;
            self.reused = self.candles.len();
            fold_candles(&mut self.candles, &ticks[from..range.end], anchor, self.period);
        } else {
            self.candles = build_candles(ticks, range.clone(), anchor, self.period);
            self.reused = 0;
        }

        self.anchor = anchor;
        self.range = range;
    }
}

/// How the moving average is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingAverageKind {
    /// Average of raw tick values over the trailing `window` milliseconds.
    Duration { window: i64 },
    /// Average of the last `count` candle closes, candles of `period` ms.
    CandleCount { count: usize, period: i64 },
}

impl Default for MovingAverageKind {
    fn default() -> Self {
        Self::CandleCount {
            count: 5,
            period: 20_000,
        }
    }
}

/// One point of a moving-average trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAveragePoint {
    pub time: i64,
    pub average: f64,
}

/// Trailing time-window average for every tick of `window`.
///
/// A tick contributes a point once a full `duration` of history precedes
/// it. Empty when the store spans less than `duration`.
pub fn duration_moving_average(
    ticks: &[Tick],
    window: VisibleWindow,
    duration: i64,
) -> Vec<MovingAveragePoint> {
    profile_function!();
    let (Some(first), Some(last)) = (ticks.first(), ticks.last()) else {
        return Vec::new();
    };
    if last.time - first.time < duration {
        return Vec::new();
    }

    let earliest = first.time + duration;
    window
        .slice(ticks)
        .iter()
        .filter(|tick| tick.time >= earliest)
        .map(|tick| {
            let lo = ticks.partition_point(|t| t.time < tick.time - duration);
            let hi = ticks.partition_point(|t| t.time <= tick.time);
            let sum: f64 = ticks[lo..hi].iter().map(|t| t.value).sum();
            MovingAveragePoint {
                time: tick.time,
                average: sum / (hi - lo) as f64,
            }
        })
        .collect()
}

/// Average of the last `count` closes, one point per candle from index `count - 1`.
pub fn candle_moving_average(candles: &[Candle], count: usize) -> Vec<MovingAveragePoint> {
    if count == 0 || candles.len() < count {
        return Vec::new();
    }
    candles
        .windows(count)
        .map(|group| {
            let sum: f64 = group.iter().map(|c| c.close).sum();
            MovingAveragePoint {
                time: group[count - 1].time,
                average: sum / count as f64,
            }
        })
        .collect()
}
