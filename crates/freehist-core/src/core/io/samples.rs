use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Malformed sample on line {line} ('{content}'): {kind}")]
pub struct SampleParseError {
    pub line: usize,
    pub content: String,
    pub kind: SampleParseErrorKind,
}

#[derive(Debug, Error, PartialEq)]
pub enum SampleParseErrorKind {
    #[error("expected {expected} numeric column(s), found {found}")]
    WrongFieldCount { expected: usize, found: usize },
    #[error("invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
    #[error("non-finite value in column {column} (value: '{value}')")]
    NonFinite { column: usize, value: String },
    #[error("line is not valid UTF-8 (invalid byte at offset {offset})")]
    InvalidEncoding { offset: usize },
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("I/O error while reading samples: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] SampleParseError),
}

/// One parsed input record, borrowing the raw line from the reader's buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<'a, const D: usize> {
    /// 1-based line number in the input stream.
    pub line: usize,
    pub content: &'a str,
    pub values: [f64; D],
}

/// Parses exactly `D` whitespace-separated floating-point fields out of `content`.
///
/// Leading and trailing whitespace is ignored. Blank lines, a wrong number of fields, and fields
/// that are not finite numbers are all rejected.
pub fn parse_record<const D: usize>(line: usize, content: &str) -> Result<[f64; D], SampleParseError> {
    let fail = |kind| SampleParseError {
        line,
        content: content.to_string(),
        kind,
    };

    let mut values = [0.0; D];
    let mut found = 0;
    for token in content.split_whitespace() {
        if found < D {
            let value: f64 = token.parse().map_err(|_| {
                fail(SampleParseErrorKind::InvalidFloat {
                    column: found + 1,
                    value: token.to_string(),
                })
            })?;
            if !value.is_finite() {
                return Err(fail(SampleParseErrorKind::NonFinite {
                    column: found + 1,
                    value: token.to_string(),
                }));
            }
            values[found] = value;
        }
        found += 1;
    }

    if found != D {
        return Err(fail(SampleParseErrorKind::WrongFieldCount { expected: D, found }));
    }
    Ok(values)
}

/// Line-oriented reader of `D`-column sample records.
///
/// The line buffer is reused between records, so each [`Sample`] borrows from the reader and
/// must be consumed before the next call to [`SampleReader::next_sample`]. Lines are read as raw
/// bytes; a line that is not valid UTF-8 is a malformed record, not an I/O failure.
pub struct SampleReader<R, const D: usize> {
    reader: R,
    buffer: Vec<u8>,
    line: usize,
}

impl<R: BufRead, const D: usize> SampleReader<R, D> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    pub fn next_sample(&mut self) -> Result<Option<Sample<'_, D>>, SampleError> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let raw = trim_line_ending(&self.buffer);
        let content = std::str::from_utf8(raw).map_err(|e| SampleParseError {
            line: self.line,
            content: String::from_utf8_lossy(raw).into_owned(),
            kind: SampleParseErrorKind::InvalidEncoding {
                offset: e.valid_up_to(),
            },
        })?;
        let values = parse_record::<D>(self.line, content)?;
        Ok(Some(Sample {
            line: self.line,
            content,
            values,
        }))
    }
}

fn trim_line_ending(mut bytes: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = bytes {
        bytes = rest;
    }
    bytes
}
