use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    bins::BinBoundaries,
    error::{ConfigError, Error},
    filter::FilterConfig,
    parser::ParseOptions,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    /// Derive every weekday against this year instead of the record's own year.
    pub year: Option<i32>,
}

/// Everything one run needs besides the weather file itself.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub parse: ParseOptions,
    pub calendar: CalendarOptions,
    pub filters: FilterConfig,
    pub bins: BinBoundaries,
}

impl AnalysisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::Io(path.to_path_buf(), e))?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Bin boundaries validate themselves on construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filters.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        calendar::MonthDay, filter::OccupiedHourConvention, units::TemperatureUnit,
    };

    #[test]
    fn empty_file_is_the_default() {
        assert_eq!(AnalysisConfig::from_toml_str("").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn full_file() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [parse]
            header_lines = 8
            epw_missing_code = true

            [calendar]
            year = 2023

            [filters]
            include_weekends = false
            occupied_hour_start = 8
            occupied_hour_end = 18
            occupied_hour_convention = "start_exclusive"
            excluded_date_start = "12-20"
            excluded_date_end = "01-05"

            [bins]
            boundaries = [-5, 0, 5.5, 20]
            unit = "celsius"
            "#,
        )
        .unwrap();

        assert!(config.parse.epw_missing_code);
        assert_eq!(config.calendar.year, Some(2023));
        assert!(!config.filters.include_weekends);
        assert_eq!(config.filters.occupied_hour_start, 8);
        assert_eq!(
            config.filters.occupied_hour_convention,
            OccupiedHourConvention::StartExclusive
        );
        assert_eq!(config.filters.excluded_date_start, Some(MonthDay::new(12, 20).unwrap()));
        assert_eq!(config.filters.excluded_date_end, Some(MonthDay::new(1, 5).unwrap()));
        assert_eq!(config.bins.boundaries(), &[-5.0, 0.0, 5.5, 20.0]);
        assert_eq!(config.bins.unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn bins_section_keeps_defaults_for_missing_keys() {
        let config = AnalysisConfig::from_toml_str("[bins]\nunit = \"C\"").unwrap();
        assert_eq!(config.bins.boundaries().len(), 9);
        assert_eq!(config.bins.unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AnalysisConfig::from_toml_str("[bins]\nboundaries = [3, 1]").is_err());
        assert!(AnalysisConfig::from_toml_str("[filters]\nexcluded_date_start = \"02-30\"\nexcluded_date_end = \"03-01\"").is_err());
        assert!(matches!(
            AnalysisConfig::from_toml_str("[filters]\noccupied_hour_end = 30"),
            Err(ConfigError::HourOutOfRange(30))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml_str("[filters]\nexcluded_date_end = \"03-01\""),
            Err(ConfigError::IncompleteDateRange)
        ));
        assert!(AnalysisConfig::from_toml_str("[unknown]").is_err());

        let err = AnalysisConfig::from_toml_str("[bins]\nunit = \"kelvin\"").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
        match err {
            ConfigError::Toml(toml) => {
                assert!(toml.message().contains("Unknown temperature unit `kelvin`"), "{toml}")
            }
            other => panic!("expected a TOML error, got {other:?}"),
        }
    }

    #[test]
    fn unit_spellings() {
        for (spelling, unit) in [
            ("°F", TemperatureUnit::Fahrenheit),
            ("F", TemperatureUnit::Fahrenheit),
            ("celsius", TemperatureUnit::Celsius),
            ("ºC", TemperatureUnit::Celsius),
        ] {
            let config = AnalysisConfig::from_toml_str(&format!("[bins]\nunit = \"{spelling}\""))
                .unwrap();
            assert_eq!(config.bins.unit(), unit, "{spelling}");
        }
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AnalysisConfig::from_toml_str(
            "[bins]\nunit = \"C\"\n[filters]\nexcluded_date_start = \"12-20\"\nexcluded_date_end = \"01-05\"",
        )
        .unwrap();
        let written = toml::to_string(&config).unwrap();
        assert!(written.contains("unit = \"celsius\""), "{written}");
        assert_eq!(AnalysisConfig::from_toml_str(&written).unwrap(), config);
    }
}
