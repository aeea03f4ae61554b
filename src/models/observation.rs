use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Variable, WeatherValues};

/// One station-day of measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub station_id: u32,
    pub date: NaiveDate,
    pub values: WeatherValues,

    // Cardinal wind direction (ddd_car); carried through, never reduced
    pub wind_direction: Option<String>,
}

impl Observation {
    pub fn new(station_id: u32, date: NaiveDate, values: WeatherValues) -> Self {
        Self {
            station_id,
            date,
            values,
            wind_direction: None,
        }
    }

    pub fn with_wind_direction(mut self, direction: &str) -> Self {
        self.wind_direction = Some(direction.to_string());
        self
    }

    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.values.get(variable)
    }

    pub fn key(&self) -> (u32, NaiveDate) {
        (self.station_id, self.date)
    }
}
