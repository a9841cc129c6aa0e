use super::config::{AxisSpec, ConfigError, HistogramConfig};
use std::array;

/// Bin layout along one axis.
///
/// The bin count is `ceil((max - min) / width)`, so the last bin may extend past `max` when the
/// range is not a multiple of the width. Edges are `min + width * i` for `i` in
/// `0..=bin_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGrid {
    spec: AxisSpec,
    bin_count: usize,
    edges: Vec<f64>,
}

impl AxisGrid {
    fn new(axis: usize, spec: AxisSpec) -> Result<Self, ConfigError> {
        spec.validate(axis)?;

        let raw_count = ((spec.max - spec.min) / spec.width).ceil();
        if !raw_count.is_finite() || raw_count < 1.0 || raw_count >= usize::MAX as f64 {
            return Err(ConfigError::InvalidBinCount {
                axis,
                min: spec.min,
                max: spec.max,
                width: spec.width,
            });
        }
        let bin_count = raw_count as usize;
        let edges = (0..=bin_count)
            .map(|i| spec.min + spec.width * i as f64)
            .collect();

        Ok(Self {
            spec,
            bin_count,
            edges,
        })
    }

    pub fn min(&self) -> f64 {
        self.spec.min
    }

    /// Upper bound of the accepted range as configured, not the last edge.
    pub fn max(&self) -> f64 {
        self.spec.max
    }

    pub fn width(&self) -> f64 {
        self.spec.width
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn center(&self, bin: usize) -> f64 {
        self.edges[bin] + 0.5 * self.spec.width
    }
}

/// Immutable `D`-dimensional bin layout with row-major addressing.
///
/// Flat indices enumerate bins with axis 0 outermost and axis `D - 1` varying fastest, which is
/// also the row order of both output tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<const D: usize> {
    axes: [AxisGrid; D],
    total_bins: usize,
}

impl<const D: usize> Grid<D> {
    pub fn new(config: &HistogramConfig<D>) -> Result<Self, ConfigError> {
        Self::from_axes(config.axes())
    }

    pub fn from_axes(specs: &[AxisSpec; D]) -> Result<Self, ConfigError> {
        let mut built = Vec::with_capacity(D);
        for (axis, spec) in specs.iter().enumerate() {
            built.push(AxisGrid::new(axis, *spec)?);
        }

        let mut total_bins: usize = 1;
        for (axis, grid) in built.iter().enumerate() {
            total_bins = total_bins.checked_mul(grid.bin_count).ok_or_else(|| {
                ConfigError::InvalidBinCount {
                    axis,
                    min: grid.min(),
                    max: grid.max(),
                    width: grid.width(),
                }
            })?;
        }

        let mut built = built.into_iter();
        let axes = array::from_fn(|_| built.next().expect("one AxisGrid per AxisSpec"));

        Ok(Self { axes, total_bins })
    }

    pub fn axes(&self) -> &[AxisGrid; D] {
        &self.axes
    }

    pub fn axis(&self, axis: usize) -> &AxisGrid {
        &self.axes[axis]
    }

    pub fn shape(&self) -> [usize; D] {
        array::from_fn(|axis| self.axes[axis].bin_count)
    }

    pub fn total_bins(&self) -> usize {
        self.total_bins
    }

    /// Product of the per-axis widths.
    pub fn bin_volume(&self) -> f64 {
        self.axes.iter().map(AxisGrid::width).product()
    }

    /// Row-major flat index of a bin-index tuple. Indices must lie inside [`Self::shape`].
    #[inline]
    pub fn flat_index(&self, bin: &[usize; D]) -> usize {
        self.axes
            .iter()
            .zip(bin)
            .fold(0, |flat, (axis, &i)| flat * axis.bin_count + i)
    }

    /// Inverse of [`Self::flat_index`].
    pub fn unravel(&self, mut flat: usize) -> [usize; D] {
        let mut bin = [0; D];
        for axis in (0..D).rev() {
            let count = self.axes[axis].bin_count;
            bin[axis] = flat % count;
            flat /= count;
        }
        bin
    }

    pub fn centers(&self, bin: &[usize; D]) -> [f64; D] {
        array::from_fn(|axis| self.axes[axis].center(bin[axis]))
    }
}
