use crate::error::{ProcessingError, Result};
use crate::models::StationRef;
use crate::readers::table::{csv_reader, require_columns, row_error};
use crate::utils::constants::STATIONS_SOURCE;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;
use validator::Validate;

const REQUIRED_COLUMNS: [&str; 6] = [
    "station_id",
    "region_id",
    "province_id",
    "latitude",
    "longitude",
    "station_name",
];

#[derive(Debug, Deserialize, Validate)]
struct StationRow {
    station_id: u32,
    region_id: u32,
    province_id: u16,

    #[validate(range(min = -90.0, max = 90.0))]
    latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    longitude: f64,

    #[validate(length(min = 1))]
    station_name: String,

    // Optional column; stations files without it have no region names
    #[serde(default)]
    region_name: Option<String>,
}

pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read station metadata from the stations file
    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationRef>> {
        let file = File::open(path)?;
        let stations = self.read_from(BufReader::new(file))?;
        info!("Loaded {} stations from {}", stations.len(), path.display());
        Ok(stations)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<StationRef>> {
        let mut reader = csv_reader(reader);
        require_columns(&mut reader, STATIONS_SOURCE, &REQUIRED_COLUMNS)?;

        let mut stations = Vec::new();
        for (index, result) in reader.deserialize::<StationRow>().enumerate() {
            let row_number = index + 1;
            let row = result.map_err(|e| row_error(STATIONS_SOURCE, row_number, e))?;

            // Coordinates and name must be usable by the map view
            row.validate().map_err(|e| {
                ProcessingError::data_format(STATIONS_SOURCE, row_number, e.to_string())
            })?;

            let mut station = StationRef::new(
                row.station_id,
                row.region_id,
                row.province_id,
                row.latitude,
                row.longitude,
                &row.station_name,
            );
            if let Some(region_name) = row.region_name.as_deref().filter(|n| !n.is_empty()) {
                station = station.with_region_name(region_name);
            }
            stations.push(station);
        }

        Ok(stations)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
