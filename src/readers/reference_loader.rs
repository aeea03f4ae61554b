use crate::config::DataConfig;
use crate::error::Result;
use crate::models::{Observation, ProvinceRef, StationRef};
use crate::readers::{ObservationReader, ProvinceReader, StationReader};
use crate::utils::progress::ProgressReporter;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The three raw reference tables, as read from disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub provinces: Vec<ProvinceRef>,
    pub stations: Vec<StationRef>,
    pub observations: Vec<Observation>,
}

impl ReferenceData {
    pub fn new(
        provinces: Vec<ProvinceRef>,
        stations: Vec<StationRef>,
        observations: Vec<Observation>,
    ) -> Self {
        Self {
            provinces,
            stations,
            observations,
        }
    }
}

pub struct ReferenceLoader {
    config: DataConfig,
}

impl ReferenceLoader {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    pub fn load_provinces(&self) -> Result<Vec<ProvinceRef>> {
        ProvinceReader::new().read_provinces(&self.config.provinces_path())
    }

    pub fn load_stations(&self) -> Result<Vec<StationRef>> {
        StationReader::new().read_stations(&self.config.stations_path())
    }

    pub fn load_observations(&self) -> Result<Vec<Observation>> {
        ObservationReader::new()
            .with_missing_sentinels(self.config.missing_sentinels.clone())
            .with_mmap(self.config.use_mmap)
            .read_observations(&self.config.observations_path())
    }

    /// Read all three tables; the observations file is read alongside the
    /// two small tables. Any failure aborts the whole load.
    pub fn load(&self, progress: Option<&ProgressReporter>) -> Result<ReferenceData> {
        if let Some(p) = progress {
            p.set_stage("Reading reference tables...");
        }

        let ((provinces, stations), observations) = rayon::join(
            || (self.load_provinces(), self.load_stations()),
            || self.load_observations(),
        );

        let data = ReferenceData::new(provinces?, stations?, observations?);

        info!(
            "Loaded reference data: {} provinces, {} stations, {} observations",
            data.provinces.len(),
            data.stations.len(),
            data.observations.len()
        );

        if let Some(p) = progress {
            p.set_stage(&format!("Read {} observations", data.observations.len()));
        }

        Ok(data)
    }
}

impl Default for ReferenceLoader {
    fn default() -> Self {
        Self::new(DataConfig::default())
    }
}
