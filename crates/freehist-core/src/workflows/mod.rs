//! # Workflows Module
//!
//! Top-level entry points. [`histogram::run`] consumes a line-oriented reader and produces a
//! frozen [`crate::engine::landscape::Landscape`]; [`histogram::write_outputs`] renders both
//! tables in memory and persists them atomically.

pub mod histogram;
