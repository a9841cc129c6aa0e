use crate::core::grid::Grid;

/// Dense per-bin sample counter, stored as one flat row-major buffer.
///
/// Indices are trusted: the classifier clamps every sample into the grid before it reaches
/// [`Accumulator::increment`].
#[derive(Debug, Clone)]
pub struct Accumulator<'g, const D: usize> {
    grid: &'g Grid<D>,
    counts: Vec<u64>,
}

impl<'g, const D: usize> Accumulator<'g, D> {
    pub fn new(grid: &'g Grid<D>) -> Self {
        Self {
            grid,
            counts: vec![0; grid.total_bins()],
        }
    }

    pub fn grid(&self) -> &'g Grid<D> {
        self.grid
    }

    #[inline]
    pub fn increment(&mut self, bin: &[usize; D]) {
        let flat = self.grid.flat_index(bin);
        self.counts[flat] += 1;
    }

    pub fn count(&self, bin: &[usize; D]) -> u64 {
        self.counts[self.grid.flat_index(bin)]
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AxisSpec;

    fn grid_3d() -> Grid<3> {
        Grid::from_axes(&[
            AxisSpec::new(0.0, 2.0, 1.0),
            AxisSpec::new(0.0, 2.0, 1.0),
            AxisSpec::new(0.0, 3.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn new_accumulator_is_all_zero() {
        let grid = grid_3d();
        let acc = Accumulator::new(&grid);
        assert_eq!(acc.counts().len(), 12);
        assert!(acc.counts().iter().all(|&c| c == 0));
        assert_eq!(acc.total(), 0);
    }

    #[test]
    fn increment_targets_row_major_cell() {
        let grid = grid_3d();
        let mut acc = Accumulator::new(&grid);
        acc.increment(&[1, 0, 2]);
        acc.increment(&[1, 0, 2]);
        acc.increment(&[0, 1, 0]);

        assert_eq!(acc.count(&[1, 0, 2]), 2);
        assert_eq!(acc.count(&[0, 1, 0]), 1);
        assert_eq!(acc.counts()[8], 2);
        assert_eq!(acc.counts()[3], 1);
        assert_eq!(acc.total(), 3);
    }

    #[test]
    fn into_counts_returns_frozen_buffer() {
        let grid = Grid::from_axes(&[AxisSpec::new(0.0, 10.0, 5.0)]).unwrap();
        let mut acc = Accumulator::new(&grid);
        acc.increment(&[1]);
        assert_eq!(acc.into_counts(), vec![0, 1]);
    }
}
