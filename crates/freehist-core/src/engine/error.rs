use crate::core::config::ConfigError;
use crate::core::io::samples::{SampleError, SampleParseError};
use std::fmt;
use std::io;
use thiserror::Error;

/// Which side of the accepted `[min, max)` range a sample fell out of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBound {
    BelowMin { min: f64 },
    AtOrAboveMax { max: f64 },
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::BelowMin { min } => write!(f, "below min {}", min),
            RangeBound::AtOrAboveMax { max } => write!(f, "at or above max {}", max),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Input parsing failed: {0}")]
    Parse(#[from] SampleParseError),

    #[error(
        "Out-of-range sample on line {line} ('{content}'): value {value} on axis {axis} is {bound}; aborting because strict out-of-range checking is on"
    )]
    RangeViolation {
        axis: usize,
        value: f64,
        bound: RangeBound,
        line: usize,
        content: String,
    },

    #[error("No samples were read from the input; the probability density is undefined")]
    EmptyInput,

    #[error("Every bin of the histogram is empty; the free-energy landscape is undefined")]
    EmptyLandscape,

    #[error("I/O error while reading samples: {0}")]
    Io(#[from] io::Error),
}

impl From<SampleError> for EngineError {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::Io(e) => EngineError::Io(e),
            SampleError::Parse(e) => EngineError::Parse(e),
        }
    }
}
