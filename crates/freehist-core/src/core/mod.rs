//! # Core Module
//!
//! Stateless building blocks shared by every histogram pipeline.
//!
//! - **Configuration** ([`config`]) - Per-axis ranges, temperature and output policy, validated
//!   once by [`config::HistogramConfigBuilder`].
//! - **Grid** ([`grid`]) - Bin counts, bin edges and row-major addressing derived from a config.
//! - **Thermodynamics** ([`thermo`]) - The molar gas constant and the Boltzmann inversion.
//! - **I/O** ([`io`]) - Parsing of whitespace-separated sample records and rendering of the
//!   output tables.

pub mod config;
pub mod grid;
pub mod io;
pub mod thermo;
