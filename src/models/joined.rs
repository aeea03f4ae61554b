use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::{GroupBy, Observation, StationRef, Variable, WeatherValues};

/// An observation flattened with its full geographic lineage
///
/// Geography fields are `None` when the observation's station (or the
/// station's province) is missing from the reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub date: NaiveDate,
    pub station_id: u32,
    pub region_id: Option<u32>,
    pub province_id: Option<u16>,
    pub station_name: Option<Arc<str>>,
    pub region_name: Option<Arc<str>>,
    pub province_name: Option<Arc<str>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub values: WeatherValues,
    pub wind_direction: Option<String>,
}

impl JoinedRecord {
    /// Join an observation with its (already province-joined) station
    pub fn from_parts(observation: Observation, station: Option<&StationRef>) -> Self {
        Self {
            date: observation.date,
            station_id: observation.station_id,
            region_id: station.map(|s| s.region_id),
            province_id: station.map(|s| s.province_id),
            station_name: station.map(|s| s.station_name.clone()),
            region_name: station.and_then(|s| s.region_name.clone()),
            province_name: station.and_then(|s| s.province_name.clone()),
            latitude: station.map(|s| s.latitude),
            longitude: station.map(|s| s.longitude),
            values: observation.values,
            wind_direction: observation.wind_direction,
        }
    }

    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.values.get(variable)
    }

    /// Name of the geographic unit this record belongs to at `level`
    pub fn group_name(&self, level: GroupBy) -> Option<&Arc<str>> {
        match level {
            GroupBy::Province => self.province_name.as_ref(),
            GroupBy::Region => self.region_name.as_ref(),
            GroupBy::Station => self.station_name.as_ref(),
        }
    }

    pub fn has_station(&self) -> bool {
        self.station_name.is_some()
    }

    /// Canonical order: (province_id, region_id, station_id, date), nulls last
    pub fn hierarchy_cmp(&self, other: &Self) -> Ordering {
        nulls_last(self.province_id, other.province_id)
            .then_with(|| nulls_last(self.region_id, other.region_id))
            .then_with(|| self.station_id.cmp(&other.station_id))
            .then_with(|| self.date.cmp(&other.date))
    }
}

pub(crate) fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
