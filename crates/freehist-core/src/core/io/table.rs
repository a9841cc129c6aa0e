use crate::core::grid::Grid;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

const COORDINATE_WIDTH: usize = 10;
const COORDINATE_PRECISION: usize = 5;
const VALUE_WIDTH: usize = 12;
const VALUE_SIGNIFICANT_DIGITS: usize = 6;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output file '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to move staged output into place at '{path}': {source}", path = path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A per-bin data column, indexed by row-major flat bin index.
#[derive(Debug, Clone, Copy)]
pub enum Column<'a> {
    Real(&'a [f64]),
    Count(&'a [u64]),
}

/// Writes one row per bin in row-major order: the bin-center coordinates followed by `columns`.
pub fn write_table<W: Write, const D: usize>(
    writer: &mut W,
    grid: &Grid<D>,
    columns: &[Column<'_>],
) -> io::Result<()> {
    for flat in 0..grid.total_bins() {
        for (axis, center) in grid.centers(&grid.unravel(flat)).iter().enumerate() {
            if axis > 0 {
                writer.write_all(b" ")?;
            }
            write!(
                writer,
                "{:>w$.p$}",
                center,
                w = COORDINATE_WIDTH,
                p = COORDINATE_PRECISION
            )?;
        }
        for column in columns {
            match column {
                Column::Real(values) => write!(
                    writer,
                    " {:>w$}",
                    format_general(values[flat], VALUE_SIGNIFICANT_DIGITS),
                    w = VALUE_WIDTH
                )?,
                Column::Count(counts) => write!(writer, " {:>w$}", counts[flat], w = VALUE_WIDTH)?,
            }
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Formats `value` like C's `%g`: `significant` digits, fixed or exponential notation depending
/// on the decimal exponent, trailing zeros removed.
pub fn format_general(value: f64, significant: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let significant = significant.max(1);
    let scientific = format!("{:.*e}", significant - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= significant as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (significant as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// A fully written temporary file waiting to be moved onto its final path.
///
/// The temporary lives in the destination directory so that [`StagedOutput::commit`] is a
/// rename. Dropping an uncommitted stage deletes the temporary file.
pub struct StagedOutput {
    file: NamedTempFile,
    path: PathBuf,
}

impl StagedOutput {
    pub fn stage(path: &Path, contents: &[u8]) -> Result<Self, OutputError> {
        let io_err = |source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(directory).map_err(io_err)?;
        file.write_all(contents).map_err(io_err)?;
        file.flush().map_err(io_err)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(self) -> Result<PathBuf, OutputError> {
        let Self { file, path } = self;
        match file.persist(&path) {
            Ok(_) => Ok(path),
            Err(e) => Err(OutputError::Persist {
                path,
                source: e.error,
            }),
        }
    }
}
