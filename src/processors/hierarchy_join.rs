use crate::models::{JoinedRecord, Observation, ProvinceRef, StationRef};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::info;

/// Left-joins observations → stations → provinces into one flat record set
pub struct HierarchyJoin;

impl HierarchyJoin {
    pub fn new() -> Self {
        Self
    }

    /// Stations carrying their province name, sorted by
    /// (province_id, region_id, station_id). Stations whose province is
    /// unknown are kept with no province name.
    pub fn join_stations(&self, stations: &[StationRef], provinces: &[ProvinceRef]) -> Vec<StationRef> {
        let provinces_by_id: HashMap<u16, &ProvinceRef> =
            provinces.iter().map(|p| (p.province_id, p)).collect();

        let mut joined: Vec<StationRef> = stations
            .iter()
            .map(|station| station.with_province(provinces_by_id.get(&station.province_id).copied()))
            .collect();

        joined.sort_by(|a, b| {
            a.province_id
                .cmp(&b.province_id)
                .then_with(|| a.region_id.cmp(&b.region_id))
                .then_with(|| a.station_id.cmp(&b.station_id))
        });

        joined
    }

    /// One record per observation, sorted by
    /// (province_id, region_id, station_id, date) with nulls last.
    /// Observations with no known station are kept with null geography.
    pub fn join(
        &self,
        observations: Vec<Observation>,
        stations: &[StationRef],
        provinces: &[ProvinceRef],
    ) -> Vec<JoinedRecord> {
        let joined_stations = self.join_stations(stations, provinces);
        self.join_with_stations(observations, &joined_stations)
    }

    /// Join against a station table that already carries province names
    pub fn join_with_stations(
        &self,
        observations: Vec<Observation>,
        joined_stations: &[StationRef],
    ) -> Vec<JoinedRecord> {
        let stations_by_id: HashMap<u32, &StationRef> = joined_stations
            .iter()
            .map(|s| (s.station_id, s))
            .collect();

        let mut records: Vec<JoinedRecord> = observations
            .into_iter()
            .map(|observation| {
                let station = stations_by_id.get(&observation.station_id).copied();
                JoinedRecord::from_parts(observation, station)
            })
            .collect();

        // Stable, so equal keys keep their input order
        records.par_sort_by(|a, b| a.hierarchy_cmp(b));

        let unmatched = records.iter().filter(|r| !r.has_station()).count();
        info!(
            "Joined {} observations ({} without a known station)",
            records.len(),
            unmatched
        );

        records
    }
}

impl Default for HierarchyJoin {
    fn default() -> Self {
        Self::new()
    }
}
