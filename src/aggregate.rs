use std::fmt;

use serde::{Serialize, Serializer};

use crate::{bins::BinBoundaries, error::ConsistencyError, record::WeatherRecord};

/// Share of filtered hours in a bin, or a marker that the run's totals do not add up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    Value(f64),
    Error,
}

impl Percentage {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::Error => None,
        }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{:.1}%", value * 100.0),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::Error => serializer.serialize_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub bin_label: String,
    pub count_unconditioned: u64,
    pub count_filtered: u64,
    pub percent_of_filtered: Percentage,
}

/// Running per-bin counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    unconditioned: Vec<u64>,
    filtered: Vec<u64>,
    included_hours: u64,
    /// Records whose bin is not one of the counted bins.
    unknown_bin: u64,
}

impl Tally {
    pub fn new(bin_count: usize) -> Self {
        Self {
            unconditioned: vec![0; bin_count],
            filtered: vec![0; bin_count],
            included_hours: 0,
            unknown_bin: 0,
        }
    }

    pub fn add(&mut self, record: &WeatherRecord) {
        let included = record.inclusion.included;
        if included {
            self.included_hours += 1;
        }
        let Some(bin) = record.bin else {
            return;
        };
        match (self.unconditioned.get_mut(bin), self.filtered.get_mut(bin)) {
            (Some(unconditioned), Some(filtered)) => {
                *unconditioned += 1;
                if included {
                    *filtered += 1;
                }
            }
            _ => self.unknown_bin += 1,
        }
    }

    pub fn finish(self, bins: &BinBoundaries) -> Aggregation {
        let total_unconditioned = self.unconditioned.iter().sum();
        let total_filtered: u64 = self.filtered.iter().sum();

        let consistency = if self.unconditioned.len() != bins.bin_count() {
            Some(ConsistencyError::BinCount {
                counted: self.unconditioned.len(),
                expected: bins.bin_count(),
            })
        } else if self.unknown_bin > 0 {
            Some(ConsistencyError::UnknownBin {
                records: self.unknown_bin,
                bin_count: self.unconditioned.len(),
            })
        } else if total_filtered != self.included_hours {
            Some(ConsistencyError::Mismatch {
                binned: total_filtered,
                included: self.included_hours,
            })
        } else {
            None
        };
        if let Some(error) = &consistency {
            log::warn!("{error}");
        }

        let percentage = |count: u64| match (&consistency, total_filtered) {
            (Some(_), _) => Percentage::Error,
            (None, 0) => Percentage::Value(0.0),
            (None, total) => Percentage::Value(count as f64 / total as f64),
        };

        let rows = bins
            .labels()
            .into_iter()
            .zip(self.unconditioned.iter().zip(&self.filtered))
            .map(|(bin_label, (&count_unconditioned, &count_filtered))| AggregationResult {
                bin_label,
                count_unconditioned,
                count_filtered,
                percent_of_filtered: percentage(count_filtered),
            })
            .collect();

        Aggregation {
            rows,
            total_unconditioned,
            total_filtered,
            included_hours: self.included_hours,
            consistency,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// One row per bin, lowest first.
    pub rows: Vec<AggregationResult>,
    pub total_unconditioned: u64,
    pub total_filtered: u64,
    /// Records with `included_final`, whatever their temperature.
    pub included_hours: u64,
    pub consistency: Option<ConsistencyError>,
}

impl Aggregation {
    pub fn is_consistent(&self) -> bool {
        self.consistency.is_none()
    }
}

/// Counts classified records into `bins`.
pub fn aggregate(records: &[WeatherRecord], bins: &BinBoundaries) -> Aggregation {
    let mut tally = Tally::new(bins.bin_count());
    for record in records {
        tally.add(record);
    }
    tally.finish(bins)
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|row| row.bin_label.chars().count())
            .max()
            .unwrap_or(0)
            .max("Bin".len());

        writeln!(f, "{:<width$}  {:>8}  {:>8}  {:>7}", "Bin", "All", "Filtered", "Share")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<width$}  {:>8}  {:>8}  {:>7}",
                row.bin_label,
                row.count_unconditioned,
                row.count_filtered,
                row.percent_of_filtered.to_string()
            )?;
        }
        write!(
            f,
            "{:<width$}  {:>8}  {:>8}",
            "Total", self.total_unconditioned, self.total_filtered
        )?;
        if let Some(error) = &self.consistency {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}
