//! Test utilities for tickscope.
//!
//! - [`MockSurface`] - a drawing surface that records every frame and can
//!   be inspected after it has been moved into a chart
//! - [`generators`] - deterministic tick streams
//!
//! # Example
//!
//! ```rust
//! use tickscope::{Chart, ChartConfig};
//! use tickscope_test_utils::{MockSurface, generators};
//!
//! let surface = MockSurface::new(800, 600);
//! let probe = surface.clone();
//!
//! let chart = Chart::new(surface, generators::linear(10, 1_000, 100.0, 1.0), ChartConfig::default())
//!     .unwrap();
//!
//! assert_eq!(probe.frame_count(), 1);
//! assert_eq!(chart.stats().renders, 1);
//! ```

pub mod generators;
pub mod mock_surface;

pub use mock_surface::{MockSurface, Recording};
