use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, units::TemperatureUnit};

pub const DEFAULT_BOUNDARIES: [f64; 9] = [25.0, 35.0, 45.0, 55.0, 65.0, 75.0, 85.0, 95.0, 105.0];

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawBoundaries {
    boundaries: Vec<f64>,
    unit: TemperatureUnit,
}

impl Default for RawBoundaries {
    fn default() -> Self {
        Self {
            boundaries: DEFAULT_BOUNDARIES.to_vec(),
            unit: TemperatureUnit::Fahrenheit,
        }
    }
}

/// Strictly increasing thresholds splitting temperatures into `len + 1` bins.
/// A temperature equal to a threshold belongs to the lower bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundaries")]
pub struct BinBoundaries {
    boundaries: Vec<f64>,
    unit: TemperatureUnit,
}

impl TryFrom<RawBoundaries> for BinBoundaries {
    type Error = ConfigError;

    fn try_from(raw: RawBoundaries) -> Result<Self, Self::Error> {
        Self::new(raw.boundaries, raw.unit)
    }
}

impl Default for BinBoundaries {
    fn default() -> Self {
        Self {
            boundaries: DEFAULT_BOUNDARIES.to_vec(),
            unit: TemperatureUnit::Fahrenheit,
        }
    }
}

impl BinBoundaries {
    pub fn new(boundaries: Vec<f64>, unit: TemperatureUnit) -> Result<Self, ConfigError> {
        if boundaries.is_empty() {
            return Err(ConfigError::NoBoundaries);
        }
        if let Some(index) = boundaries.iter().position(|b| !b.is_finite()) {
            return Err(ConfigError::NonFiniteBoundary { index });
        }
        if let Some(pair) = boundaries.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::UnsortedBoundaries {
                previous: pair[0],
                next: pair[1],
            });
        }
        Ok(Self { boundaries, unit })
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn bin_count(&self) -> usize {
        self.boundaries.len() + 1
    }

    /// Bin `i` holds `b[i-1] < t <= b[i]`; the first bin is open below and the last open above.
    pub fn classify(&self, temperature: Option<f64>) -> Option<usize> {
        let t = temperature.filter(|t| !t.is_nan())?;
        Some(self.boundaries.partition_point(|&b| b < t))
    }

    pub fn labels(&self) -> Vec<String> {
        let unit = self.unit.symbol();
        let first = self.boundaries[0];
        let last = self.boundaries[self.boundaries.len() - 1];

        let mut labels = Vec::with_capacity(self.bin_count());
        labels.push(format!("<= {first}{unit}"));
        labels.extend(
            self.boundaries
                .windows(2)
                .map(|pair| format!("{} to {}{unit}", pair[0], pair[1])),
        );
        labels.push(format!("> {last}{unit}"));
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_bins() {
        let bins = BinBoundaries::default();
        assert_eq!(bins.bin_count(), 10);
        assert_eq!(bins.unit(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn boundaries_belong_to_the_lower_bin() {
        let bins = BinBoundaries::default();
        assert_eq!(bins.classify(Some(-40.0)), Some(0));
        assert_eq!(bins.classify(Some(25.0)), Some(0));
        assert_eq!(bins.classify(Some(25.000001)), Some(1));
        assert_eq!(bins.classify(Some(35.0)), Some(1));
        assert_eq!(bins.classify(Some(70.0)), Some(5));
        assert_eq!(bins.classify(Some(105.0)), Some(8));
        assert_eq!(bins.classify(Some(105.5)), Some(9));
        assert_eq!(bins.classify(Some(f64::INFINITY)), Some(9));
    }

    #[test]
    fn missing_has_no_bin() {
        let bins = BinBoundaries::default();
        assert_eq!(bins.classify(None), None);
        assert_eq!(bins.classify(Some(f64::NAN)), None);
    }

    #[test]
    fn labels() {
        let bins = BinBoundaries::new(vec![0.0, 10.5], TemperatureUnit::Celsius).unwrap();
        assert_eq!(bins.labels(), vec!["<= 0°C", "0 to 10.5°C", "> 10.5°C"]);
        assert_eq!(BinBoundaries::default().labels()[1], "25 to 35°F");
    }

    #[test]
    fn rejects_bad_boundaries() {
        assert!(matches!(
            BinBoundaries::new(vec![], TemperatureUnit::Fahrenheit),
            Err(ConfigError::NoBoundaries)
        ));
        assert!(matches!(
            BinBoundaries::new(vec![1.0, f64::NAN], TemperatureUnit::Fahrenheit),
            Err(ConfigError::NonFiniteBoundary { index: 1 })
        ));
        assert!(matches!(
            BinBoundaries::new(vec![1.0, 3.0, 3.0], TemperatureUnit::Fahrenheit),
            Err(ConfigError::UnsortedBoundaries { previous, next }) if previous == 3.0 && next == 3.0
        ));
    }

    fn sorted_boundaries() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::btree_set(-100i32..150, 1..12)
            .prop_map(|set| set.into_iter().map(f64::from).collect())
    }

    proptest! {
        #[test]
        fn prop_exactly_one_bin(boundaries in sorted_boundaries(), t in -200.0..200.0f64) {
            let bins = BinBoundaries::new(boundaries.clone(), TemperatureUnit::Fahrenheit).unwrap();
            let bin = bins.classify(Some(t)).unwrap();
            prop_assert!(bin < bins.bin_count());

            let matching = (0..bins.bin_count())
                .filter(|&i| {
                    let above_lower = i == 0 || boundaries[i - 1] < t;
                    let below_upper = i == boundaries.len() || t <= boundaries[i];
                    above_lower && below_upper
                })
                .collect::<Vec<_>>();
            prop_assert_eq!(matching, vec![bin]);
        }

        #[test]
        fn prop_monotonic(boundaries in sorted_boundaries(), a in -200.0..200.0f64, b in -200.0..200.0f64) {
            let bins = BinBoundaries::new(boundaries, TemperatureUnit::Fahrenheit).unwrap();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bins.classify(Some(low)) <= bins.classify(Some(high)));
        }
    }
}
