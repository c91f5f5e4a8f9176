use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month, Weekday};

use crate::error::{CalendarError, ConfigError};

/// Day of the week where 0 is Sunday and 6 is Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn is_weekend(self) -> bool {
        self == Self::SATURDAY || self == Self::SUNDAY
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        // Monday-based index shifted by one lands Sunday on zero.
        Self((weekday.number_days_from_monday() + 1) % 7)
    }
}

/// Computes the day of week of a proleptic Gregorian date.
pub fn day_of_week(year: i32, month: u8, day: u8) -> Result<DayOfWeek, CalendarError> {
    let invalid = |source| CalendarError::InvalidDate {
        year,
        month,
        day,
        source,
    };
    let month_of_year = Month::try_from(month).map_err(invalid)?;
    let date = Date::from_calendar_date(year, month_of_year, day).map_err(invalid)?;
    Ok(date.weekday().into())
}

/// Weather files number hours 1 to 24, hour 24 closing the day.
pub fn check_hour(hour: u8) -> Result<u8, CalendarError> {
    if (1..=24).contains(&hour) {
        Ok(hour)
    } else {
        Err(CalendarError::HourOutOfRange(hour))
    }
}

/// A day of the year without its year, ordered by month then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    pub month: u8,
    pub day: u8,
}

impl MonthDay {
    /// Accepts any day that exists in at least one year, so February 29 is valid.
    pub fn new(month: u8, day: u8) -> Result<Self, ConfigError> {
        let bad = || ConfigError::BadDate(format!("{month:02}-{day:02}"));
        let month_of_year = Month::try_from(month).map_err(|_| bad())?;
        if day == 0 || day > time::util::days_in_year_month(2024, month_of_year) {
            return Err(bad());
        }
        Ok(Self { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigError::BadDate(s.to_string());
        let (month, day) = s.trim().split_once(['-', '/']).ok_or_else(bad)?;
        let month = month.parse().map_err(|_| bad())?;
        let day = day.parse().map_err(|_| bad())?;
        Self::new(month, day).map_err(|_| bad())
    }
}

impl TryFrom<String> for MonthDay {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}
