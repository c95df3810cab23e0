//! Visible-window location.
//!
//! Binary search over the ordered store for the index range covering the
//! clip span, padded by at most one tick per side so lines reach the edges
//! of the plot area.

use crate::store::Tick;
use std::ops::RangeInclusive;

/// Inclusive store indices `t1..=t2` of the ticks on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    pub t1: usize,
    pub t2: usize,
}

impl VisibleWindow {
    pub fn new(t1: usize, t2: usize) -> Self {
        Self { t1, t2 }
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.t1..=self.t2
    }

    /// Ticks inside the window, empty if the window does not fit `ticks`.
    pub fn slice<'a>(&self, ticks: &'a [Tick]) -> &'a [Tick] {
        ticks.get(self.range()).unwrap_or(&[])
    }
}

/// Index of the tick closest in time to `target`.
///
/// Ties go to the lower index. Returns 0 for stores with fewer than two
/// ticks and clamps targets outside the domain to the boundary index.
pub fn nearest_index(ticks: &[Tick], target: f64) -> usize {
    if ticks.len() <= 1 {
        return 0;
    }

    let first_at_or_after = ticks.partition_point(|t| (t.time as f64) < target);
    let past_at_or_before = ticks.partition_point(|t| (t.time as f64) <= target);

    if past_at_or_before == 0 {
        return 0;
    }
    if first_at_or_after == ticks.len() {
        return ticks.len() - 1;
    }

    let below = past_at_or_before - 1;
    let above = first_at_or_after;
    if above <= below {
        // exact hit, `above` is the first duplicate
        return above;
    }

    let d_below = target - ticks[below].time as f64;
    let d_above = ticks[above].time as f64 - target;
    if d_above < d_below { above } else { below }
}

/// Window covering `[clip_base, clip_max]`.
pub fn locate(ticks: &[Tick], clip_base: f64, clip_max: f64) -> VisibleWindow {
    if ticks.len() <= 1 {
        return VisibleWindow::default();
    }
    let last = ticks.len() - 1;

    let mut t1 = nearest_index(ticks, clip_base);
    if ticks[t1].time as f64 > clip_base && t1 > 0 {
        t1 -= 1;
    }

    let mut t2 = nearest_index(ticks, clip_max);
    if (ticks[t2].time as f64) < clip_max && t2 < last {
        t2 += 1;
    }

    VisibleWindow { t1, t2 }
}
