use serde::{Deserialize, Serialize};

use crate::{
    calendar::MonthDay,
    error::ConfigError,
    record::{Inclusion, WeatherRecord},
};

/// How `occupied_hour_start` compares against the record hour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupiedHourConvention {
    /// `start <= hour <= end`.
    #[default]
    Inclusive,
    /// `start + 1 <= hour <= end`, as some older workbooks computed it.
    StartExclusive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// When false, Saturdays and Sundays are excluded.
    pub include_weekends: bool,
    pub occupied_hour_start: u8,
    pub occupied_hour_end: u8,
    pub occupied_hour_convention: OccupiedHourConvention,
    /// Hours strictly between the two dates are excluded; the dates themselves are kept.
    /// The window wraps the new year when the end comes before the start.
    pub excluded_date_start: Option<MonthDay>,
    pub excluded_date_end: Option<MonthDay>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_weekends: true,
            occupied_hour_start: 0,
            occupied_hour_end: 24,
            occupied_hour_convention: OccupiedHourConvention::Inclusive,
            excluded_date_start: None,
            excluded_date_end: None,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for hour in [self.occupied_hour_start, self.occupied_hour_end] {
            if hour > 24 {
                return Err(ConfigError::HourOutOfRange(hour));
            }
        }
        if self.excluded_date_start.is_some() != self.excluded_date_end.is_some() {
            return Err(ConfigError::IncompleteDateRange);
        }
        Ok(())
    }

    /// Runs all three predicates. Missing calendar fields exclude the hour.
    pub fn evaluate(&self, record: &WeatherRecord) -> Inclusion {
        let weekend = record
            .day_of_week
            .is_some_and(|day| self.weekend_included(day.is_weekend()));
        let occupied = record.hour.is_some_and(|hour| self.hour_included(hour));
        let date = match (record.month, record.day) {
            (Some(month), Some(day)) => self.date_included(MonthDay { month, day }),
            _ => false,
        };
        Inclusion::new(weekend, occupied, date)
    }

    pub fn weekend_included(&self, is_weekend: bool) -> bool {
        self.include_weekends || !is_weekend
    }

    pub fn hour_included(&self, hour: u8) -> bool {
        let start = match self.occupied_hour_convention {
            OccupiedHourConvention::Inclusive => self.occupied_hour_start,
            OccupiedHourConvention::StartExclusive => self.occupied_hour_start.saturating_add(1),
        };
        start <= hour && hour <= self.occupied_hour_end
    }

    pub fn date_included(&self, date: MonthDay) -> bool {
        let (Some(start), Some(end)) = (self.excluded_date_start, self.excluded_date_end) else {
            return true;
        };
        let inside = if end < start {
            date > start || date < end
        } else {
            date > start && date < end
        };
        !inside
    }
}
