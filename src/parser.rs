use std::{fmt, str::FromStr};

use logos::Logos;
use miette::NamedSource;
use serde::{Deserialize, Serialize};

use crate::{
    error::{FormatError, MissingValueError, RecordError, RecordIssue},
    record::WeatherRecord,
};

pub const HEADER_LINES: usize = 8;

/// Year, month, day, hour, two ignored fields, dry bulb temperature.
pub const MIN_FIELDS: usize = 7;

/// Value EPW files write in the dry bulb column when the reading is missing.
pub const EPW_MISSING_DRY_BULB: f64 = 99.9;

const COLUMN_YEAR: usize = 0;
const COLUMN_MONTH: usize = 1;
const COLUMN_DAY: usize = 2;
const COLUMN_HOUR: usize = 3;
const COLUMN_DRY_BULB: usize = 6;

/// Fields hold printable text, spaces and tabs; any other control character is an error.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"\r")]
enum Token {
    #[token(",")]
    Comma,
    #[regex(r"[^,\x00-\x08\x0A-\x1F\x7F]+")]
    Value,
}

/// The fields read from every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    DryBulb,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::DryBulb => "dry bulb temperature",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub header_lines: usize,
    pub min_fields: usize,
    /// Read a dry bulb of exactly 99.9 as missing.
    pub epw_missing_code: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header_lines: HEADER_LINES,
            min_fields: MIN_FIELDS,
            epw_missing_code: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    /// In source order.
    pub records: Vec<WeatherRecord>,
    pub issues: Vec<RecordIssue>,
}

/// Reads every record after the header. Unreadable values become missing and are
/// reported in `issues`; a short file or a short line fails the whole input.
pub fn parse_records(input: &str, options: &ParseOptions) -> Result<ParsedRecords, FormatError> {
    let mut lines = input.lines().enumerate();

    for skipped in 0..options.header_lines {
        if lines.next().is_none() {
            return Err(FormatError::ShortHeader {
                expected: options.header_lines,
                found: skipped,
            });
        }
    }

    let mut parsed = ParsedRecords::default();
    for (index, line) in lines {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line_number, line)?;
        if fields.len() < options.min_fields.max(MIN_FIELDS) {
            return Err(FormatError::TooFewFields {
                line: line_number,
                expected: options.min_fields.max(MIN_FIELDS),
                found: fields.len(),
                src: NamedSource::new(format!("line {line_number}"), line.to_string()),
                span: (0, line.len()).into(),
            });
        }

        let mut record = WeatherRecord::new(line_number);
        let mut missing = |error: MissingValueError| {
            log::warn!("line {line_number}: {error}");
            parsed.issues.push(RecordIssue {
                line: line_number,
                error: RecordError::MissingValue(error),
            });
        };

        record.year = read(fields[COLUMN_YEAR], Field::Year).map_err(&mut missing).ok();
        record.month = read(fields[COLUMN_MONTH], Field::Month).map_err(&mut missing).ok();
        record.day = read(fields[COLUMN_DAY], Field::Day).map_err(&mut missing).ok();
        record.hour = read(fields[COLUMN_HOUR], Field::Hour).map_err(&mut missing).ok();
        record.temperature_c = read_temperature(fields[COLUMN_DRY_BULB], options)
            .map_err(&mut missing)
            .ok();

        parsed.records.push(record);
    }

    log::debug!("parsed {} records", parsed.records.len());
    Ok(parsed)
}

fn split_fields(line_number: usize, line: &str) -> Result<Vec<&str>, FormatError> {
    let mut fields = Vec::with_capacity(32);
    let mut current = "";
    let mut lexer = Token::lexer(line);

    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Value) => current = lexer.slice(),
            Ok(Token::Comma) => {
                fields.push(current);
                current = "";
            }
            Err(()) => {
                let span = lexer.span();
                return Err(FormatError::BadCharacter {
                    line: line_number,
                    column: span.start + 1,
                    src: NamedSource::new(format!("line {line_number}"), line.to_string()),
                    span: span.into(),
                });
            }
        }
    }
    fields.push(current);

    Ok(fields)
}

fn read<T: FromStr>(raw: &str, field: Field) -> Result<T, MissingValueError> {
    raw.trim().parse().map_err(|_| MissingValueError {
        field,
        raw: raw.to_string(),
    })
}

fn read_temperature(raw: &str, options: &ParseOptions) -> Result<f64, MissingValueError> {
    let missing = || MissingValueError {
        field: Field::DryBulb,
        raw: raw.to_string(),
    };
    let value: f64 = read(raw, Field::DryBulb)?;
    if !value.is_finite() || (options.epw_missing_code && value == EPW_MISSING_DRY_BULB) {
        return Err(missing());
    }
    Ok(value)
}
