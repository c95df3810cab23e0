//! Tickscope Core
//!
//! Shared primitives for the tickscope chart engine: colors, logging bootstrap
//! and profiling scopes.

pub mod color;
pub mod logging;
pub mod profiling;

pub use color::Color;
