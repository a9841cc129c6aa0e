use super::accumulator::Accumulator;
use super::error::EngineError;
use crate::core::grid::Grid;
use crate::core::thermo::boltzmann_inversion;
use tracing::{debug, info};

/// Per-bin probability density and shifted free energy derived from a set of counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub density: Vec<f64>,
    /// Free energy in kJ/mol, shifted so the lowest finite value is exactly zero. Empty bins
    /// hold `+inf`.
    pub free_energy: Vec<f64>,
    pub total_samples: u64,
}

/// Converts frozen counts into density and free energy.
///
/// `density = count / total / bin_volume` and `free_energy = -RT ln(density)`, after which the
/// minimum over all finite bins is subtracted. This is a pure function of its inputs.
///
/// # Errors
///
/// [`EngineError::EmptyInput`] if no samples were counted, [`EngineError::EmptyLandscape`] if
/// no bin ends up with a finite free energy.
pub fn convert<const D: usize>(
    grid: &Grid<D>,
    counts: &[u64],
    temperature: f64,
) -> Result<Conversion, EngineError> {
    debug_assert_eq!(counts.len(), grid.total_bins());

    let total_samples: u64 = counts.iter().sum();
    if total_samples == 0 {
        return Err(EngineError::EmptyInput);
    }

    let normalization = total_samples as f64 * grid.bin_volume();
    let density: Vec<f64> = counts
        .iter()
        .map(|&count| count as f64 / normalization)
        .collect();

    let mut free_energy: Vec<f64> = density
        .iter()
        .map(|&p| boltzmann_inversion(p, temperature))
        .collect();

    let minimum = free_energy
        .iter()
        .copied()
        .filter(|f| f.is_finite())
        .fold(f64::INFINITY, f64::min);
    if !minimum.is_finite() {
        return Err(EngineError::EmptyLandscape);
    }
    debug!("Shifting free energy by its minimum of {:.6} kJ/mol.", minimum);

    for f in free_energy.iter_mut() {
        *f -= minimum;
    }

    Ok(Conversion {
        density,
        free_energy,
        total_samples,
    })
}

/// The frozen outcome of one histogram run.
#[derive(Debug, Clone)]
pub struct Landscape<const D: usize> {
    grid: Grid<D>,
    counts: Vec<u64>,
    conversion: Conversion,
    temperature: f64,
    clamped_samples: u64,
}

impl<const D: usize> Landscape<D> {
    pub fn from_accumulator(
        accumulator: Accumulator<'_, D>,
        temperature: f64,
        clamped_samples: u64,
    ) -> Result<Self, EngineError> {
        let grid = accumulator.grid().clone();
        let counts = accumulator.into_counts();
        let conversion = convert(&grid, &counts, temperature)?;

        info!(
            "In total, {} samples have been considered ({} clamped into edge bins).",
            conversion.total_samples, clamped_samples
        );

        Ok(Self {
            grid,
            counts,
            conversion,
            temperature,
            clamped_samples,
        })
    }

    pub fn grid(&self) -> &Grid<D> {
        &self.grid
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn density(&self) -> &[f64] {
        &self.conversion.density
    }

    pub fn free_energy(&self) -> &[f64] {
        &self.conversion.free_energy
    }

    pub fn total_samples(&self) -> u64 {
        self.conversion.total_samples
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn clamped_samples(&self) -> u64 {
        self.clamped_samples
    }

    /// Number of bins that received no samples and therefore have infinite free energy.
    pub fn empty_bins(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }
}
