use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::parser::Field;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
    #[error("Could not read '{0}'")]
    #[diagnostic(code(epw_bins::io))]
    Io(PathBuf, #[source] std::io::Error),
}

/// The input file cannot be turned into records at all. Aborts the run.
#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("Expected at least {expected} header lines, found {found}")]
    #[diagnostic(
        code(epw_bins::format::short_header),
        help("weather files start with a fixed metadata header; is this the right file?")
    )]
    ShortHeader { expected: usize, found: usize },

    #[error("Line {line} has {found} fields, expected at least {expected}")]
    #[diagnostic(code(epw_bins::format::too_few_fields))]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("this record")]
        span: SourceSpan,
    },

    #[error("Line {line} contains an unexpected character at column {column}")]
    #[diagnostic(code(epw_bins::format::bad_character))]
    BadCharacter {
        line: usize,
        column: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("At least one bin boundary is required")]
    #[diagnostic(code(epw_bins::config::no_boundaries))]
    NoBoundaries,
    #[error("Bin boundary #{index} is not a finite number")]
    #[diagnostic(code(epw_bins::config::non_finite_boundary))]
    NonFiniteBoundary { index: usize },
    #[error("Bin boundaries must be strictly increasing: {previous} is followed by {next}")]
    #[diagnostic(
        code(epw_bins::config::unsorted_boundaries),
        help("list the boundaries in ascending order without duplicates")
    )]
    UnsortedBoundaries { previous: f64, next: f64 },
    #[error("Occupied hour {0} is outside 0..=24")]
    #[diagnostic(code(epw_bins::config::hour_out_of_range))]
    HourOutOfRange(u8),
    #[error("Bad date `{0}`, expecting MM-DD")]
    #[diagnostic(code(epw_bins::config::bad_date))]
    BadDate(String),
    #[error("Excluded date range needs both a start and an end")]
    #[diagnostic(code(epw_bins::config::incomplete_date_range))]
    IncompleteDateRange,
    #[error("Unknown temperature unit `{0}`")]
    #[diagnostic(
        code(epw_bins::config::unknown_unit),
        help("use `celsius` or `fahrenheit`")
    )]
    UnknownUnit(String),
    #[error("Invalid configuration file")]
    #[diagnostic(code(epw_bins::config::toml))]
    Toml(#[from] toml::de::Error),
}

/// The date or hour of a single record is not a real calendar position.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum CalendarError {
    #[error("Invalid date {year}-{month:02}-{day:02}: {source}")]
    #[diagnostic(code(epw_bins::calendar::invalid_date))]
    InvalidDate {
        year: i32,
        month: u8,
        day: u8,
        source: time::error::ComponentRange,
    },
    #[error("Hour {0} is outside 1..=24")]
    #[diagnostic(code(epw_bins::calendar::hour_out_of_range))]
    HourOutOfRange(u8),
}

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("Could not read {field} from `{raw}`")]
#[diagnostic(code(epw_bins::missing_value))]
pub struct MissingValueError {
    pub field: Field,
    pub raw: String,
}

/// The per-bin counts of a run cannot be trusted.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ConsistencyError {
    #[error("Filtered hours per bin sum to {binned} but {included} hours are included")]
    #[diagnostic(
        code(epw_bins::consistency::mismatch),
        help("every percentage of this run is reported as ERROR")
    )]
    Mismatch { binned: u64, included: u64 },
    #[error("{records} records point at a bin outside the {bin_count} bins counted")]
    #[diagnostic(
        code(epw_bins::consistency::unknown_bin),
        help("every percentage of this run is reported as ERROR")
    )]
    UnknownBin { records: u64, bin_count: usize },
    #[error("Counted {counted} bins but the boundaries define {expected}")]
    #[diagnostic(
        code(epw_bins::consistency::bin_count),
        help("every percentage of this run is reported as ERROR")
    )]
    BinCount { counted: usize, expected: usize },
}

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum RecordError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Calendar(#[from] CalendarError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingValue(#[from] MissingValueError),
}

/// A recovered problem with one record, kept so it stays visible in the output.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordIssue {
    /// 1-based line number in the source file.
    pub line: usize,
    pub error: RecordError,
}
