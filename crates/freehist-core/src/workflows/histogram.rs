use crate::core::config::HistogramConfig;
use crate::core::grid::Grid;
use crate::core::io::samples::SampleReader;
use crate::core::io::table::{Column, OutputError, StagedOutput, write_table};
use crate::engine::accumulator::Accumulator;
use crate::engine::classifier::SampleClassifier;
use crate::engine::error::EngineError;
use crate::engine::landscape::Landscape;
use crate::engine::progress::{Progress, ProgressReporter};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const PROGRESS_INTERVAL: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub histogram: PathBuf,
    pub free_energy: PathBuf,
}

/// Builds the grid, bins every record of `input` in a single pass, and converts the counts into
/// a frozen [`Landscape`].
///
/// Any malformed line, strict-mode range violation or empty input aborts the whole run; nothing
/// is written to disk here.
#[instrument(skip_all, name = "histogram_workflow")]
pub fn run<R: BufRead, const D: usize>(
    config: &HistogramConfig<D>,
    input: R,
    reporter: &ProgressReporter,
) -> Result<Landscape<D>, EngineError> {
    // === Phase 0: Grid ===
    reporter.report(Progress::PhaseStart {
        name: "Building grid",
    });
    let grid = Grid::new(config)?;
    for (axis, axis_grid) in grid.axes().iter().enumerate() {
        info!(
            "Axis {}: {} bins of width {} starting at {}.",
            axis,
            axis_grid.bin_count(),
            axis_grid.width(),
            axis_grid.min()
        );
        debug!("Axis {} edges: {:?}", axis, axis_grid.edges());
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Single pass over the input ===
    reporter.report(Progress::PhaseStart {
        name: "Binning samples",
    });
    let classifier = SampleClassifier::new(&grid, config.strict_out_of_range());
    let mut accumulator = Accumulator::new(&grid);
    let mut reader = SampleReader::<_, D>::new(input);
    let mut binned: u64 = 0;
    let mut clamped: u64 = 0;

    while let Some(sample) = reader.next_sample()? {
        let classified = classifier.classify(&sample)?;
        accumulator.increment(&classified.bin);
        if classified.clamped {
            clamped += 1;
        }
        binned += 1;
        if binned % PROGRESS_INTERVAL == 0 {
            reporter.report(Progress::SamplesRead(binned));
        }
    }
    reporter.report(Progress::SamplesRead(binned));
    reporter.report(Progress::PhaseFinish);

    if clamped > 0 {
        let message = format!(
            "{} of {} samples were outside the configured range and were clamped into edge bins.",
            clamped, binned
        );
        warn!("{}", message);
        reporter.report(Progress::Message(message));
    }

    // === Phase 2: Density and free energy ===
    reporter.report(Progress::PhaseStart {
        name: "Converting to free energy",
    });
    let landscape = Landscape::from_accumulator(accumulator, config.temperature(), clamped)?;
    if landscape.empty_bins() > 0 {
        info!(
            "{} of {} bins are empty and have infinite free energy.",
            landscape.empty_bins(),
            landscape.grid().total_bins()
        );
    }
    reporter.report(Progress::PhaseFinish);

    Ok(landscape)
}

/// Histogram table: bin centers, density, raw count.
pub fn render_histogram<const D: usize>(landscape: &Landscape<D>) -> io::Result<Vec<u8>> {
    render(
        landscape,
        &[
            Column::Real(landscape.density()),
            Column::Count(landscape.counts()),
        ],
    )
}

/// Free-energy table: bin centers, free energy in kJ/mol.
pub fn render_free_energy<const D: usize>(landscape: &Landscape<D>) -> io::Result<Vec<u8>> {
    render(landscape, &[Column::Real(landscape.free_energy())])
}

fn render<const D: usize>(landscape: &Landscape<D>, columns: &[Column<'_>]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, landscape.grid(), columns)?;
    Ok(buffer)
}

/// Renders both tables in memory and moves them onto their final paths.
///
/// Both files are fully staged before either is committed. If the second commit fails, the
/// first file is removed again so that a failed run leaves no output behind. Existing files at
/// either path are replaced; when the rollback runs, a histogram left by an earlier run is
/// therefore gone as well.
pub fn write_outputs<const D: usize>(
    landscape: &Landscape<D>,
    histogram_path: &Path,
    free_energy_path: &Path,
) -> Result<OutputPaths, OutputError> {
    for path in [histogram_path, free_energy_path] {
        if path.exists() {
            warn!("Overwriting existing output file {:?}.", path);
        }
    }

    let histogram = render_histogram(landscape).map_err(|source| OutputError::Io {
        path: histogram_path.to_path_buf(),
        source,
    })?;
    let free_energy = render_free_energy(landscape).map_err(|source| OutputError::Io {
        path: free_energy_path.to_path_buf(),
        source,
    })?;

    let histogram = StagedOutput::stage(histogram_path, &histogram)?;
    let free_energy = StagedOutput::stage(free_energy_path, &free_energy)?;

    let histogram = histogram.commit()?;
    let free_energy = match free_energy.commit() {
        Ok(path) => path,
        Err(e) => {
            if let Err(cleanup) = std::fs::remove_file(&histogram) {
                warn!(
                    "Could not remove {:?} after a failed write: {}",
                    histogram, cleanup
                );
            }
            return Err(e);
        }
    };

    info!("Wrote histogram to {:?}.", histogram);
    info!("Wrote free energy to {:?}.", free_energy);
    Ok(OutputPaths {
        histogram,
        free_energy,
    })
}

/// [`write_outputs`] to the paths derived from the configured output prefix.
pub fn write_outputs_for<const D: usize>(
    config: &HistogramConfig<D>,
    landscape: &Landscape<D>,
) -> Result<OutputPaths, OutputError> {
    write_outputs(
        landscape,
        &config.histogram_path(),
        &config.free_energy_path(),
    )
}
