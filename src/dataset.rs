use crate::analyzers::{summarize, SeriesSummary};
use crate::config::{DataConfig, DuplicatePolicy};
use crate::error::Result;
use crate::models::{AggregatedSeries, JoinedRecord, StationRef, TimeseriesRequest};
use crate::processors::{
    aggregate, resolve_duplicates, GeoSelection, HierarchyJoin, IntegrityChecker, IntegrityReport,
    SelectorOptions,
};
use crate::readers::{ReferenceData, ReferenceLoader};
use crate::utils::progress::ProgressReporter;
use tracing::{info, warn};

/// The joined climate dataset, built once and queried read-only.
///
/// Every query borrows from the dataset and allocates its own output, so a
/// single instance can be shared across threads (for example in an `Arc`).
#[derive(Debug, Clone)]
pub struct ClimateDataset {
    stations: Vec<StationRef>,
    records: Vec<JoinedRecord>,
    integrity: IntegrityReport,
}

impl ClimateDataset {
    /// Load and join the three tables named by `config`
    pub fn load(config: &DataConfig) -> Result<Self> {
        Self::load_with_progress(config, &ProgressReporter::silent())
    }

    pub fn load_with_progress(config: &DataConfig, progress: &ProgressReporter) -> Result<Self> {
        let data = ReferenceLoader::new(config.clone()).load(Some(progress))?;

        progress.set_stage("Joining observations with stations and provinces...");
        let dataset = Self::from_reference(data, config.duplicate_policy)?;

        progress.finish_with_message(&format!(
            "Loaded {} observations from {} stations",
            dataset.records.len(),
            dataset.stations.len()
        ));
        Ok(dataset)
    }

    /// Build the dataset from tables already in memory
    pub fn from_reference(data: ReferenceData, policy: DuplicatePolicy) -> Result<Self> {
        let checker = IntegrityChecker::new();
        let integrity = checker.check(&data);
        if !integrity.is_clean() {
            warn!("{}", checker.generate_summary(&integrity));
        }

        let ReferenceData {
            provinces,
            stations,
            observations,
        } = data;

        let observations = resolve_duplicates(observations, policy)?;

        let join = HierarchyJoin::new();
        let stations = join.join_stations(&stations, &provinces);
        let records = join.join_with_stations(observations, &stations);

        info!(
            "Climate dataset ready: {} records, {} stations",
            records.len(),
            stations.len()
        );

        Ok(Self {
            stations,
            records,
            integrity,
        })
    }

    /// Joined records in (province_id, region_id, station_id, date) order
    pub fn records(&self) -> &[JoinedRecord] {
        &self.records
    }

    /// Stations with their province names, in hierarchy order
    pub fn stations(&self) -> &[StationRef] {
        &self.stations
    }

    pub fn integrity_report(&self) -> &IntegrityReport {
        &self.integrity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter_by_geo(&self, selection: &GeoSelection) -> Vec<&JoinedRecord> {
        selection.apply(&self.records)
    }

    /// Stations to draw on the map for a selection
    pub fn stations_in(&self, selection: &GeoSelection) -> Vec<&StationRef> {
        selection.apply_stations(&self.stations)
    }

    pub fn selector_options(&self, selection: &GeoSelection) -> SelectorOptions {
        SelectorOptions::from_stations(&self.stations, selection)
    }

    /// Filter to `selection`, then aggregate as `request` asks
    pub fn timeseries(
        &self,
        selection: &GeoSelection,
        request: &TimeseriesRequest,
    ) -> AggregatedSeries {
        aggregate(
            self.filter_by_geo(selection),
            request.variable,
            request.period,
            request.group_by,
        )
    }

    /// The series for `request` together with its descriptive statistics
    pub fn timeseries_summary(
        &self,
        selection: &GeoSelection,
        request: &TimeseriesRequest,
    ) -> (AggregatedSeries, SeriesSummary) {
        let series = self.timeseries(selection, request);
        let summary = summarize(&series, request.group_by);
        (series, summary)
    }
}
