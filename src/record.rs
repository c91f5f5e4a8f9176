use serde::Serialize;

use crate::{calendar::DayOfWeek, units::TemperatureUnit};

/// One hour of the weather file. Anything the source could not provide is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    /// 1-based line number in the source file.
    pub line: usize,

    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    /// 1 to 24, hour 24 being the last hour of `day`.
    pub hour: Option<u8>,

    pub temperature_c: Option<f64>,
    pub temperature_f: Option<f64>,

    pub day_of_week: Option<DayOfWeek>,
    #[serde(flatten)]
    pub inclusion: Inclusion,
    /// Index into the bins, `None` when the temperature is missing.
    pub bin: Option<usize>,
}

impl WeatherRecord {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            year: None,
            month: None,
            day: None,
            hour: None,
            temperature_c: None,
            temperature_f: None,
            day_of_week: None,
            inclusion: Inclusion::default(),
            bin: None,
        }
    }

    pub fn temperature(&self, unit: TemperatureUnit) -> Option<f64> {
        match unit {
            TemperatureUnit::Celsius => self.temperature_c,
            TemperatureUnit::Fahrenheit => self.temperature_f,
        }
    }
}

/// Outcome of the three inclusion predicates for one hour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Inclusion {
    #[serde(rename = "included_weekend_filter")]
    pub weekend_filter: bool,
    #[serde(rename = "included_occupied_hours")]
    pub occupied_hours: bool,
    #[serde(rename = "included_date_range")]
    pub date_range: bool,
    #[serde(rename = "included_final")]
    pub included: bool,
}

impl Inclusion {
    pub fn new(weekend_filter: bool, occupied_hours: bool, date_range: bool) -> Self {
        Self {
            weekend_filter,
            occupied_hours,
            date_range,
            included: weekend_filter & occupied_hours & date_range,
        }
    }
}
