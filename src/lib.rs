//! Hourly temperature bins from annual weather files.
//!
//! Every hour of the file is parsed, given a day of week, checked against the
//! weekend, occupied-hour and excluded-date filters, and counted into temperature
//! bins, once for all hours and once for the hours the filters keep.

pub mod aggregate;
pub mod analysis;
pub mod bins;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod parser;
pub mod record;
pub mod units;

pub use aggregate::{aggregate, Aggregation, AggregationResult, Percentage, Tally};
pub use analysis::{analyze, analyze_file, BinReport};
pub use bins::{BinBoundaries, DEFAULT_BOUNDARIES};
pub use calendar::{check_hour, day_of_week, DayOfWeek, MonthDay};
pub use config::{AnalysisConfig, CalendarOptions};
pub use error::{
    CalendarError, ConfigError, ConsistencyError, Error, FormatError, MissingValueError,
    RecordError, RecordIssue,
};
pub use filter::{FilterConfig, OccupiedHourConvention};
pub use parser::{parse_records, Field, ParseOptions, ParsedRecords};
pub use record::{Inclusion, WeatherRecord};
pub use units::{celsius_to_fahrenheit, fahrenheit_to_celsius, TemperatureUnit};
