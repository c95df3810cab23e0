//! Error types for the chart engine.

use std::fmt;

/// Errors that can occur while building or feeding a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The drawing surface could not yield a drawable context.
    ///
    /// Raised only at construction; there is no frame to render into.
    SurfaceUnavailable {
        /// Surface width reported by the host.
        width: u32,
        /// Surface height reported by the host.
        height: u32,
    },

    /// A configuration value is out of range.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A tick arrived with a timestamp earlier than the last stored one.
    OutOfOrder {
        /// Time of the last stored tick.
        last: i64,
        /// Time of the rejected tick.
        got: i64,
    },

    /// A tick value is NaN or infinite.
    InvalidValue {
        /// Time of the rejected tick.
        time: i64,
        /// The rejected value.
        value: f64,
    },

    /// The chart was destroyed and no longer accepts data.
    Stopped,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::SurfaceUnavailable { width, height } => write!(
                f,
                "Drawing surface ({}x{}) did not provide a drawable context",
                width, height
            ),
            ChartError::InvalidConfig { field, reason } => {
                write!(f, "Invalid chart configuration for '{}': {}", field, reason)
            }
            ChartError::OutOfOrder { last, got } => write!(
                f,
                "Tick at {} is earlier than the last stored tick at {}",
                got, last
            ),
            ChartError::InvalidValue { time, value } => {
                write!(f, "Tick at {} has a non-finite value: {}", time, value)
            }
            ChartError::Stopped => write!(f, "Chart has been destroyed"),
        }
    }
}

impl std::error::Error for ChartError {}

/// Result type alias for chart operations.
pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_out_of_order() {
        let err = ChartError::OutOfOrder { last: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "Tick at 5 is earlier than the last stored tick at 10"
        );
    }

    #[test]
    fn test_display_invalid_config() {
        let err = ChartError::InvalidConfig {
            field: "base_period",
            reason: "must be positive".into(),
        };
        assert!(err.to_string().contains("base_period"));
    }
}
