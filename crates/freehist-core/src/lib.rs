//! # freehist Core Library
//!
//! Fixed-resolution histograms of one- and three-dimensional samples, normalized into
//! probability densities and converted into relative free-energy landscapes through the
//! Boltzmann relation `F = -RT ln p`.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless pieces: the validated [`core::config::HistogramConfig`],
//!   the immutable [`core::grid::Grid`], thermodynamic constants, and the plain-text sample and
//!   table formats.
//!
//! - **[`engine`]: The Single Pass.** The sample classifier with its out-of-range policy, the
//!   dense row-major accumulator, and the density/free-energy converter.
//!
//! - **[`workflows`]: The Public API.** Runs the whole pipeline over a line-oriented reader and
//!   writes both output tables without ever leaving a partially written file behind.
//!
//! Every pipeline is generic over the number of axes `D`; the command-line tool instantiates it
//! for `D = 1` and `D = 3`.

pub mod core;
pub mod engine;
pub mod workflows;
