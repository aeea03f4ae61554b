use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::ProvinceRef;

/// A weather station and its place in the province/region hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRef {
    pub station_id: u32,
    pub region_id: u32,
    pub province_id: u16,
    pub latitude: f64,
    pub longitude: f64,
    pub station_name: Arc<str>,
    pub region_name: Option<Arc<str>>,

    // Filled in by the province join; None when the province is unknown
    pub province_name: Option<Arc<str>>,
}

impl StationRef {
    pub fn new(
        station_id: u32,
        region_id: u32,
        province_id: u16,
        latitude: f64,
        longitude: f64,
        station_name: &str,
    ) -> Self {
        Self {
            station_id,
            region_id,
            province_id,
            latitude,
            longitude,
            station_name: Arc::from(station_name),
            region_name: None,
            province_name: None,
        }
    }

    pub fn with_region_name(mut self, region_name: &str) -> Self {
        self.region_name = Some(Arc::from(region_name));
        self
    }

    /// Copy of this station carrying the name of `province`, if any
    pub fn with_province(&self, province: Option<&ProvinceRef>) -> Self {
        Self {
            province_name: province.map(|p| p.province_name.clone()),
            ..self.clone()
        }
    }

    pub fn has_province(&self) -> bool {
        self.province_name.is_some()
    }
}
