//! # Engine Module
//!
//! The stateful part of the pipeline. A run streams every input record through the
//! [`classifier::SampleClassifier`] into an [`accumulator::Accumulator`], freezes it, and hands
//! the counts to the [`landscape`] converter.
//!
//! - **Classification** ([`classifier`]) - Record to bin-index tuple, clamping or aborting on
//!   out-of-range values.
//! - **Accumulation** ([`accumulator`]) - A flat, row-major counter buffer.
//! - **Conversion** ([`landscape`]) - Counts to probability density and shifted free energy.
//! - **Progress Monitoring** ([`progress`]) - Callbacks for user-facing feedback.
//! - **Error Handling** ([`error`]) - Every fatal condition of a run.

pub mod accumulator;
pub mod classifier;
pub mod error;
pub mod landscape;
pub mod progress;
