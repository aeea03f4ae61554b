use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ProcessingError, Result};

/// Daily weather variables carried by every observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    Tn,     // min temperature
    Tx,     // max temperature
    Tavg,   // avg temperature
    RhAvg,  // avg humidity
    Rr,     // rainfall
    Ss,     // sunshine duration
    FfX,    // max wind speed
    DddX,   // wind direction at max speed
    FfAvg,  // avg wind speed
}

pub const VARIABLE_COUNT: usize = 9;

impl Variable {
    pub const ALL: [Variable; VARIABLE_COUNT] = [
        Variable::Tn,
        Variable::Tx,
        Variable::Tavg,
        Variable::RhAvg,
        Variable::Rr,
        Variable::Ss,
        Variable::FfX,
        Variable::DddX,
        Variable::FfAvg,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the observations file
    pub fn column_name(self) -> &'static str {
        match self {
            Variable::Tn => "Tn",
            Variable::Tx => "Tx",
            Variable::Tavg => "Tavg",
            Variable::RhAvg => "RH_avg",
            Variable::Rr => "RR",
            Variable::Ss => "ss",
            Variable::FfX => "ff_x",
            Variable::DddX => "ddd_x",
            Variable::FfAvg => "ff_avg",
        }
    }

    /// Display label with units
    pub fn label(self) -> &'static str {
        match self {
            Variable::Tn => "min temperature (°C)",
            Variable::Tx => "max temperature (°C)",
            Variable::Tavg => "avg temperature (°C)",
            Variable::RhAvg => "avg humidity (%)",
            Variable::Rr => "rainfall (mm)",
            Variable::Ss => "sunshine duration (hour)",
            Variable::FfX => "max wind speed (m/s)",
            Variable::DddX => "wind direction at maximum speed (°)",
            Variable::FfAvg => "avg wind speed (m/s)",
        }
    }

    /// Look up a variable by column name or display label
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.column_name() == name || v.label() == name)
    }
}

impl FromStr for Variable {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| ProcessingError::unknown_column(s))
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// One optional value per [`Variable`], indexed by the closed enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherValues([Option<f64>; VARIABLE_COUNT]);

impl WeatherValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: Variable) -> Option<f64> {
        self.0[variable.index()]
    }

    pub fn set(&mut self, variable: Variable, value: Option<f64>) {
        self.0[variable.index()] = value;
    }

    pub fn with(mut self, variable: Variable, value: f64) -> Self {
        self.set(variable, Some(value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, Option<f64>)> + '_ {
        Variable::ALL.into_iter().map(move |v| (v, self.get(v)))
    }

    pub fn is_all_missing(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Running mean per variable that skips missing values
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAccumulator {
    sums: [f64; VARIABLE_COUNT],
    counts: [usize; VARIABLE_COUNT],
}

impl MeanAccumulator {
    pub fn push(&mut self, values: &WeatherValues) {
        for (variable, value) in values.iter() {
            if let Some(v) = value {
                self.sums[variable.index()] += v;
                self.counts[variable.index()] += 1;
            }
        }
    }

    pub fn finish(&self) -> WeatherValues {
        let mut means = WeatherValues::new();
        for variable in Variable::ALL {
            let i = variable.index();
            if self.counts[i] > 0 {
                means.set(variable, Some(self.sums[i] / self.counts[i] as f64));
            }
        }
        means
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_column_and_label() {
        assert_eq!(Variable::from_name("Tavg"), Some(Variable::Tavg));
        assert_eq!(Variable::from_name("RH_avg"), Some(Variable::RhAvg));
        assert_eq!(Variable::from_name("rainfall (mm)"), Some(Variable::Rr));
        assert_eq!(Variable::from_name("tavg"), None);
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let err = "station_name".parse::<Variable>().unwrap_err();
        assert!(matches!(err, ProcessingError::UnknownColumn { ref name } if name == "station_name"));
    }

    #[test]
    fn test_mean_accumulator_skips_missing() {
        let mut acc = MeanAccumulator::default();
        acc.push(&WeatherValues::new().with(Variable::Tavg, 20.0));
        acc.push(&WeatherValues::new().with(Variable::Tavg, 24.0).with(Variable::Rr, 3.0));
        acc.push(&WeatherValues::new());

        let means = acc.finish();
        assert_eq!(means.get(Variable::Tavg), Some(22.0));
        assert_eq!(means.get(Variable::Rr), Some(3.0));
        assert_eq!(means.get(Variable::Tn), None);
    }
}
