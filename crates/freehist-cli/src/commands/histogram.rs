use crate::cli::{CommonArgs, Hist1dArgs, Hist3dArgs};
use crate::config::{self, AxisArgs};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use freehist::core::config::HistogramConfig;
use freehist::engine::progress::ProgressReporter;
use freehist::workflows::histogram::{self, OutputPaths};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::info;

pub fn run_1d(args: Hist1dArgs, show_progress: bool) -> Result<()> {
    let axes = args.axis_args();
    run(axes, &args.common, show_progress)
}

pub fn run_3d(args: Hist3dArgs, show_progress: bool) -> Result<()> {
    let axes = args.axis_args();
    run(axes, &args.common, show_progress)
}

fn run<const D: usize>(axes: [AxisArgs; D], common: &CommonArgs, show_progress: bool) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = config::resolve(axes, common)?;
    log_parameters(&config);

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let paths = execute(&config, common.input.as_deref(), &reporter)?;

    println!("✓ Histogram written to: {}", paths.histogram.display());
    println!("✓ Free energy written to: {}", paths.free_energy.display());
    Ok(())
}

/// Runs the workflow over the input file or stdin and writes both tables only on success.
pub fn execute<const D: usize>(
    config: &HistogramConfig<D>,
    input: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<OutputPaths> {
    let landscape = match input {
        Some(path) => {
            info!("Reading samples from {:?}", path);
            let file = File::open(path).map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })?;
            histogram::run(config, BufReader::new(file), reporter)?
        }
        None => {
            info!("Reading samples from standard input.");
            histogram::run(config, io::stdin().lock(), reporter)?
        }
    };

    Ok(histogram::write_outputs_for(config, &landscape)?)
}

fn log_parameters<const D: usize>(config: &HistogramConfig<D>) {
    info!("**** Input parameters ****");
    for (axis, spec) in config.axes().iter().enumerate() {
        info!("axis {}: min {}, max {}, width {}", axis, spec.min, spec.max, spec.width);
    }
    info!("T: {} K", config.temperature());
    info!("strict out-of-range: {}", config.strict_out_of_range());
    info!("fout_prefix: {}", config.output_prefix());
    info!("Files to be created: {}", config.histogram_path().display());
    info!("Files to be created: {}", config.free_energy_path().display());
}
