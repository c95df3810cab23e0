//! Deterministic tick generators.

use tickscope::Tick;

/// Small seeded PRNG (mulberry32), returns values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Standard normal sample (Box-Muller).
    pub fn next_normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// Geometric Brownian motion price path.
///
/// Emits `count` ticks `step_ms` apart starting at `start` with price
/// `initial`. `drift` and `volatility` are per step.
#[derive(Debug, Clone)]
pub struct GbmTicks {
    rng: Mulberry32,
    time: i64,
    price: f64,
    step_ms: i64,
    drift: f64,
    volatility: f64,
    remaining: usize,
}

impl GbmTicks {
    pub fn new(seed: u32, start: i64, initial: f64, step_ms: i64, count: usize) -> Self {
        Self {
            rng: Mulberry32::new(seed),
            time: start,
            price: initial,
            step_ms,
            drift: 0.0,
            volatility: 0.002,
            remaining: count,
        }
    }

    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }
}

impl Iterator for GbmTicks {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let tick = Tick::new(self.time, self.price);
        let increment = (self.drift - 0.5 * self.volatility * self.volatility)
            + self.volatility * self.rng.next_normal();
        self.price *= increment.exp();
        self.time += self.step_ms;
        Some(tick)
    }
}

/// `count` ticks `step_ms` apart from time 0, value `start + slope * i`.
pub fn linear(count: usize, step_ms: i64, start: f64, slope: f64) -> Vec<Tick> {
    (0..count)
        .map(|i| Tick::new(i as i64 * step_ms, start + slope * i as f64))
        .collect()
}

/// Ticks with arbitrary sorted times and a repeating value pattern.
pub fn from_times(times: &[i64], values: &[f64]) -> Vec<Tick> {
    times
        .iter()
        .enumerate()
        .map(|(i, t)| Tick::new(*t, values[i % values.len().max(1)]))
        .collect()
}
