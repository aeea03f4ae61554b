use crate::error::{ProcessingError, Result};
use crate::models::{Observation, Variable, WeatherValues};
use crate::readers::table::{csv_reader, require_columns, row_error};
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_MISSING_SENTINELS, OBSERVATIONS_SOURCE};
use crate::utils::dates::parse_day_first;
use memmap2::Mmap;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

// Field names follow the file's column headers
#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
struct ObservationRow {
    station_id: u32,
    date: String,
    Tn: Option<f64>,
    Tx: Option<f64>,
    Tavg: Option<f64>,
    RH_avg: Option<f64>,
    RR: Option<f64>,
    ss: Option<f64>,
    ff_x: Option<f64>,
    ddd_x: Option<f64>,
    ff_avg: Option<f64>,
    #[serde(default)]
    ddd_car: Option<String>,
}

impl ObservationRow {
    fn raw_values(&self) -> [(Variable, Option<f64>); 9] {
        [
            (Variable::Tn, self.Tn),
            (Variable::Tx, self.Tx),
            (Variable::Tavg, self.Tavg),
            (Variable::RhAvg, self.RH_avg),
            (Variable::Rr, self.RR),
            (Variable::Ss, self.ss),
            (Variable::FfX, self.ff_x),
            (Variable::DddX, self.ddd_x),
            (Variable::FfAvg, self.ff_avg),
        ]
    }
}

pub struct ObservationReader {
    missing_sentinels: Vec<f64>,
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            missing_sentinels: DEFAULT_MISSING_SENTINELS.to_vec(),
            use_mmap: false,
        }
    }

    pub fn with_missing_sentinels(mut self, sentinels: Vec<f64>) -> Self {
        self.missing_sentinels = sentinels;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Read daily observations from the climate data file
    pub fn read_observations(&self, path: &Path) -> Result<Vec<Observation>> {
        let observations = if self.use_mmap {
            self.read_observations_mmap(path)?
        } else {
            let file = File::open(path)?;
            self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))?
        };

        info!(
            "Loaded {} observations from {}",
            observations.len(),
            path.display()
        );
        Ok(observations)
    }

    /// Read observations using memory-mapped I/O for large files
    fn read_observations_mmap(&self, path: &Path) -> Result<Vec<Observation>> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        self.read_from(&mmap[..])
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<Observation>> {
        let mut reader = csv_reader(reader);
        let mut required = vec!["station_id", "date"];
        required.extend(Variable::ALL.iter().map(|v| v.column_name()));
        require_columns(&mut reader, OBSERVATIONS_SOURCE, &required)?;

        let mut observations = Vec::new();
        for (index, result) in reader.deserialize::<ObservationRow>().enumerate() {
            let row_number = index + 1;
            let row = result.map_err(|e| row_error(OBSERVATIONS_SOURCE, row_number, e))?;
            observations.push(self.parse_row(row, row_number)?);
        }

        Ok(observations)
    }

    fn parse_row(&self, row: ObservationRow, row_number: usize) -> Result<Observation> {
        // Dates are strictly day-first; anything else fails the load
        let date = parse_day_first(&row.date).ok_or_else(|| {
            ProcessingError::data_format(
                OBSERVATIONS_SOURCE,
                row_number,
                format!("invalid date '{}', expected DD/MM/YYYY", row.date),
            )
        })?;

        let mut values = WeatherValues::new();
        for (variable, raw) in row.raw_values() {
            values.set(variable, self.clean_value(raw));
        }

        let mut observation = Observation::new(row.station_id, date, values);
        if let Some(direction) = row.ddd_car.as_deref().filter(|d| !d.is_empty()) {
            observation = observation.with_wind_direction(direction);
        }
        Ok(observation)
    }

    /// Map sentinel codes and non-finite numbers to missing
    fn clean_value(&self, value: Option<f64>) -> Option<f64> {
        value.filter(|v| v.is_finite() && !self.missing_sentinels.contains(v))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}
