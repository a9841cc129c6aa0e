use freehist::core::config::ConfigError;
use freehist::core::io::table::OutputError;
use freehist::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_PARSE: i32 = 3;
pub const EXIT_OUT_OF_RANGE: i32 = 4;
pub const EXIT_EMPTY_INPUT: i32 = 5;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read config file '{path}': {source}", path = path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open input file '{path}': {source}", path = path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit status, distinct per failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidConfig(_)
            | CliError::FileParsing { .. }
            | CliError::ConfigRead { .. }
            | CliError::Argument(_) => EXIT_CONFIG,
            CliError::Engine(engine) => match engine {
                EngineError::Config(_) => EXIT_CONFIG,
                EngineError::Parse(_) => EXIT_PARSE,
                EngineError::RangeViolation { .. } => EXIT_OUT_OF_RANGE,
                EngineError::EmptyInput | EngineError::EmptyLandscape => EXIT_EMPTY_INPUT,
                EngineError::Io(_) => EXIT_FAILURE,
            },
            CliError::Output(_) | CliError::Input { .. } | CliError::Io(_) | CliError::Other(_) => {
                EXIT_FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freehist::core::io::samples::{SampleParseError, SampleParseErrorKind};
    use freehist::engine::error::RangeBound;

    #[test]
    fn exit_codes_are_distinct_per_failure_class() {
        let config = CliError::from(ConfigError::MissingParameter("temperature"));
        let parse = CliError::from(EngineError::Parse(SampleParseError {
            line: 1,
            content: "abc".into(),
            kind: SampleParseErrorKind::InvalidFloat {
                column: 1,
                value: "abc".into(),
            },
        }));
        let range = CliError::from(EngineError::RangeViolation {
            axis: 0,
            value: 11.0,
            bound: RangeBound::AtOrAboveMax { max: 10.0 },
            line: 4,
            content: "11".into(),
        });
        let empty = CliError::from(EngineError::EmptyInput);
        let io = CliError::from(std::io::Error::other("disk full"));

        let codes = [
            config.exit_code(),
            parse.exit_code(),
            range.exit_code(),
            empty.exit_code(),
            io.exit_code(),
        ];
        assert_eq!(codes, [2, 3, 4, 5, 1]);
    }

    #[test]
    fn engine_config_errors_share_the_configuration_exit_code() {
        let err = CliError::from(EngineError::Config(ConfigError::InvalidTemperature(-1.0)));
        assert_eq!(err.exit_code(), EXIT_CONFIG);
    }

    #[test]
    fn parse_error_message_names_line_and_content() {
        let err = CliError::from(EngineError::Parse(SampleParseError {
            line: 7,
            content: "1.0 2.0".into(),
            kind: SampleParseErrorKind::WrongFieldCount {
                expected: 3,
                found: 2,
            },
        }));
        let message = err.to_string();
        assert!(message.contains("line 7"));
        assert!(message.contains("1.0 2.0"));
    }
}
