//! Append-only tick storage.

use crate::error::{ChartError, ChartResult};

/// A single price sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Milliseconds since the epoch.
    pub time: i64,
    pub value: f64,
}

impl Tick {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(i64, f64)> for Tick {
    fn from((time, value): (i64, f64)) -> Self {
        Self { time, value }
    }
}

/// Ordered sequence of ticks, non-decreasing in time.
///
/// Duplicate timestamps are allowed. The running maximum value is
/// tracked on append so the price axis never has to rescan.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    ticks: Vec<Tick>,
    max_value: Option<f64>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an ordered batch.
    pub fn from_ticks(ticks: impl IntoIterator<Item = Tick>) -> ChartResult<Self> {
        let mut store = Self::new();
        for tick in ticks {
            store.push(tick)?;
        }
        Ok(store)
    }

    /// Append a tick, rejecting out-of-order times and non-finite values.
    ///
    /// The store is left untouched on error.
    pub fn push(&mut self, tick: Tick) -> ChartResult<()> {
        if !tick.value.is_finite() {
            return Err(ChartError::InvalidValue {
                time: tick.time,
                value: tick.value,
            });
        }
        if let Some(last) = self.ticks.last()
            && tick.time < last.time
        {
            return Err(ChartError::OutOfOrder {
                last: last.time,
                got: tick.time,
            });
        }

        self.max_value = Some(match self.max_value {
            Some(max) => max.max(tick.value),
            None => tick.value,
        });
        self.ticks.push(tick);
        Ok(())
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn first(&self) -> Option<&Tick> {
        self.ticks.first()
    }

    pub fn last(&self) -> Option<&Tick> {
        self.ticks.last()
    }

    /// Largest value ever stored.
    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// `last.time - first.time`, 0 when empty.
    pub fn span(&self) -> i64 {
        match (self.ticks.first(), self.ticks.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0,
        }
    }
}
