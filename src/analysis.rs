use std::path::Path;

use crate::{
    aggregate::{aggregate, Aggregation},
    bins::BinBoundaries,
    calendar::{check_hour, day_of_week},
    config::AnalysisConfig,
    error::{Error, RecordError, RecordIssue},
    filter::FilterConfig,
    parser::parse_records,
    record::WeatherRecord,
    units::celsius_to_fahrenheit,
};

/// Result of one run, handed as-is to whatever renders the report.
#[derive(Debug, Clone)]
pub struct BinReport {
    /// Every hour of the file in source order, all derived fields filled.
    pub records: Vec<WeatherRecord>,
    pub aggregation: Aggregation,
    pub filters: FilterConfig,
    pub bins: BinBoundaries,
    /// Recovered per-record problems, in source order.
    pub issues: Vec<RecordIssue>,
}

pub fn analyze(input: &str, config: &AnalysisConfig) -> Result<BinReport, Error> {
    config.validate()?;

    let parsed = parse_records(input, &config.parse)?;
    let mut issues = parsed.issues;
    let mut records = parsed.records;

    for record in &mut records {
        for error in derive(record, config) {
            log::warn!("line {}: {error}", record.line);
            issues.push(RecordIssue {
                line: record.line,
                error,
            });
        }
    }
    // Stable, so issues of one line keep the order they were found in.
    issues.sort_by_key(|issue| issue.line);

    let aggregation = aggregate(&records, &config.bins);
    log::debug!(
        "{} hours binned, {} filtered, {} included",
        aggregation.total_unconditioned,
        aggregation.total_filtered,
        aggregation.included_hours
    );

    Ok(BinReport {
        records,
        aggregation,
        filters: config.filters.clone(),
        bins: config.bins.clone(),
        issues,
    })
}

pub fn analyze_file(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<BinReport, Error> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|e| Error::Io(path.to_path_buf(), e))?;
    analyze(&input, config)
}

/// Fills the derived fields of a parsed record and returns every calendar failure met
/// on the way. A failed field stays `None`; the others are still filled.
fn derive(record: &mut WeatherRecord, config: &AnalysisConfig) -> Vec<RecordError> {
    let mut failures = Vec::new();

    if let Some(hour) = record.hour {
        if let Err(e) = check_hour(hour) {
            record.hour = None;
            failures.push(e.into());
        }
    }

    let year = config.calendar.year.or(record.year);
    if let (Some(year), Some(month), Some(day)) = (year, record.month, record.day) {
        match day_of_week(year, month, day) {
            Ok(day_of_week) => record.day_of_week = Some(day_of_week),
            Err(e) => failures.push(e.into()),
        }
    }

    record.temperature_f = celsius_to_fahrenheit(record.temperature_c);
    record.inclusion = config.filters.evaluate(record);
    record.bin = config.bins.classify(record.temperature(config.bins.unit()));

    failures
}
