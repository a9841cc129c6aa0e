use super::error::{EngineError, RangeBound};
use crate::core::grid::{AxisGrid, Grid};
use crate::core::io::samples::Sample;
use tracing::{trace, warn};

/// Bin-index tuple for one sample, plus whether any axis had to be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<const D: usize> {
    pub bin: [usize; D],
    pub clamped: bool,
}

/// Maps samples onto grid bins with `floor((value - min) / width)` per axis.
///
/// Values below `min` land in the first bin and values at or above `max` in the last bin, each
/// with a warning. In strict mode either case aborts with [`EngineError::RangeViolation`]
/// instead. Axes are checked in order, below-min before above-max.
pub struct SampleClassifier<'g, const D: usize> {
    grid: &'g Grid<D>,
    strict: bool,
}

impl<'g, const D: usize> SampleClassifier<'g, D> {
    pub fn new(grid: &'g Grid<D>, strict: bool) -> Self {
        Self { grid, strict }
    }

    pub fn classify(&self, sample: &Sample<'_, D>) -> Result<Classified<D>, EngineError> {
        let mut bin = [0; D];
        let mut clamped = false;

        for (axis, (grid, &value)) in self.grid.axes().iter().zip(&sample.values).enumerate() {
            bin[axis] = match out_of_range(grid, value) {
                None => bin_index(grid, value),
                Some(bound) => {
                    self.handle_out_of_range(axis, value, bound, sample)?;
                    clamped = true;
                    match bound {
                        RangeBound::BelowMin { .. } => 0,
                        RangeBound::AtOrAboveMax { .. } => grid.bin_count() - 1,
                    }
                }
            };
        }

        trace!(line = sample.line, ?bin, "Classified sample.");
        Ok(Classified { bin, clamped })
    }

    fn handle_out_of_range(
        &self,
        axis: usize,
        value: f64,
        bound: RangeBound,
        sample: &Sample<'_, D>,
    ) -> Result<(), EngineError> {
        match bound {
            RangeBound::BelowMin { min } => warn!(
                "Line {}: value {} on axis {} is below min {}; set min below {} to include it. Clamping to the first bin.",
                sample.line, value, axis, min, value
            ),
            RangeBound::AtOrAboveMax { max } => warn!(
                "Line {}: value {} on axis {} is not below max {}; set max above {} to include it. Clamping to the last bin.",
                sample.line, value, axis, max, value
            ),
        }

        if self.strict {
            return Err(EngineError::RangeViolation {
                axis,
                value,
                bound,
                line: sample.line,
                content: sample.content.to_string(),
            });
        }
        Ok(())
    }
}

fn out_of_range(grid: &AxisGrid, value: f64) -> Option<RangeBound> {
    if value < grid.min() {
        Some(RangeBound::BelowMin { min: grid.min() })
    } else if value >= grid.max() {
        Some(RangeBound::AtOrAboveMax { max: grid.max() })
    } else {
        None
    }
}

/// In-range values only. The cap guards against `(value - min) / width` rounding up to the
/// bin count for values just below an edge that coincides with `max`.
#[inline]
fn bin_index(grid: &AxisGrid, value: f64) -> usize {
    let index = ((value - grid.min()) / grid.width()).floor() as usize;
    index.min(grid.bin_count() - 1)
}
