//! Plain-text formats: sample records read from the input stream and the two output tables.

pub mod samples;
pub mod table;
