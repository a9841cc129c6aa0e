use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tetsuro Nagai",
    version,
    about = "freehist - Generic histogram and free-energy tool. Samples are read line by line from standard input (or --input); each line must hold exactly one value (1d) or three values (3d).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress display
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Histogram a single column of samples and convert it into a free-energy profile.
    #[command(name = "1d")]
    OneD(Hist1dArgs),
    /// Histogram three columns of samples and convert them into a free-energy landscape.
    #[command(name = "3d")]
    ThreeD(Hist3dArgs),
}

/// Options shared by every histogram subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Temperature in Kelvin for the free-energy conversion [default: 300]
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Abort when a sample outside [min, max) is found instead of clamping it into an edge bin.
    /// `--strict-out-of-range=false` overrides a config file that enables it.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub strict_out_of_range: Option<bool>,

    /// Prefix of the output files; creates PREFIX_hist.dat and PREFIX_free_energy.dat.
    #[arg(short = 'o', long = "fout-prefix", value_name = "PREFIX")]
    pub output_prefix: Option<String>,

    /// Optional configuration file in TOML format. Command-line values take precedence.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read samples from this file instead of standard input.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

/// Arguments for the `1d` subcommand.
#[derive(Args, Debug, Clone)]
pub struct Hist1dArgs {
    /// Bin width [default: 0.1]
    #[arg(long, value_name = "FLOAT")]
    pub dx: Option<f64>,

    /// Lower bound of the histogram [default: -10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Upper bound of the histogram [default: 10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub max: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the `3d` subcommand.
#[derive(Args, Debug, Clone)]
pub struct Hist3dArgs {
    // --- x axis ---
    /// Bin width along x [default: 0.1]
    #[arg(long, value_name = "FLOAT")]
    pub dx: Option<f64>,
    /// Lower bound along x [default: -10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub minx: Option<f64>,
    /// Upper bound along x [default: 10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub maxx: Option<f64>,

    // --- y axis ---
    /// Bin width along y [default: 0.1]
    #[arg(long, value_name = "FLOAT")]
    pub dy: Option<f64>,
    /// Lower bound along y [default: -10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub miny: Option<f64>,
    /// Upper bound along y [default: 10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub maxy: Option<f64>,

    // --- z axis ---
    /// Bin width along z [default: 0.1]
    #[arg(long, value_name = "FLOAT")]
    pub dz: Option<f64>,
    /// Lower bound along z [default: -10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub minz: Option<f64>,
    /// Upper bound along z [default: 10]
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub maxz: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}
