use crate::models::{JoinedRecord, StationRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A province / region / station selection; an unset level matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoSelection {
    pub province: Option<String>,
    pub region: Option<String>,
    pub station: Option<String>,
}

impl GeoSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names(province: Option<&str>, region: Option<&str>, station: Option<&str>) -> Self {
        Self {
            province: province.map(str::to_string),
            region: region.map(str::to_string),
            station: station.map(str::to_string),
        }
    }

    pub fn with_province(mut self, province: &str) -> Self {
        self.province = Some(province.to_string());
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn with_station(mut self, station: &str) -> Self {
        self.station = Some(station.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.province.is_none() && self.region.is_none() && self.station.is_none()
    }

    fn matches_names(&self, province: Option<&str>, region: Option<&str>, station: Option<&str>) -> bool {
        level_matches(self.province.as_deref(), province)
            && level_matches(self.region.as_deref(), region)
            && level_matches(self.station.as_deref(), station)
    }

    pub fn matches(&self, record: &JoinedRecord) -> bool {
        self.matches_names(
            record.province_name.as_deref(),
            record.region_name.as_deref(),
            record.station_name.as_deref(),
        )
    }

    pub fn matches_station(&self, station: &StationRef) -> bool {
        self.matches_names(
            station.province_name.as_deref(),
            station.region_name.as_deref(),
            Some(&*station.station_name),
        )
    }

    /// Records inside the selected subtree, in input order
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a JoinedRecord>
    where
        I: IntoIterator<Item = &'a JoinedRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Stations inside the selected subtree, for the map view
    pub fn apply_stations<'a>(&self, stations: &'a [StationRef]) -> Vec<&'a StationRef> {
        stations.iter().filter(|s| self.matches_station(s)).collect()
    }
}

fn level_matches(selected: Option<&str>, actual: Option<&str>) -> bool {
    match selected {
        None => true,
        Some(name) => actual == Some(name),
    }
}

/// Narrow `records` to a province/region/station subtree.
/// Unknown names give an empty result.
pub fn filter_by_geo<'a>(
    records: &'a [JoinedRecord],
    province: Option<&str>,
    region: Option<&str>,
    station: Option<&str>,
) -> Vec<&'a JoinedRecord> {
    GeoSelection::from_names(province, region, station).apply(records)
}

/// Choices offered by the cascading selectors. Each level lists the sorted
/// distinct names left after narrowing by the levels above it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOptions {
    pub provinces: Vec<String>,
    pub regions: Vec<String>,
    pub stations: Vec<String>,
}

impl SelectorOptions {
    pub fn from_stations(stations: &[StationRef], selection: &GeoSelection) -> Self {
        let provinces = distinct_names(stations.iter().map(|s| s.province_name.as_deref()));

        let in_province = GeoSelection {
            province: selection.province.clone(),
            ..GeoSelection::default()
        };
        let province_stations = in_province.apply_stations(stations);
        let regions = distinct_names(province_stations.iter().map(|s| s.region_name.as_deref()));

        let in_region = GeoSelection {
            region: selection.region.clone(),
            ..in_province
        };
        let stations = distinct_names(
            province_stations
                .into_iter()
                .filter(|s| in_region.matches_station(s))
                .map(|s| Some(&*s.station_name)),
        );

        Self {
            provinces,
            regions,
            stations,
        }
    }
}

fn distinct_names<'a>(names: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    names
        .flatten()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Observation, ProvinceRef, WeatherValues};
    use crate::processors::HierarchyJoin;
    use chrono::NaiveDate;

    fn fixture() -> (Vec<StationRef>, Vec<JoinedRecord>) {
        let provinces = vec![ProvinceRef::new(1, "Aceh"), ProvinceRef::new(2, "Bali")];
        let stations = vec![
            StationRef::new(10, 1, 1, 5.9, 95.3, "Maimun Saleh").with_region_name("Sabang"),
            StationRef::new(11, 1, 1, 5.8, 95.2, "Sabang Harbor").with_region_name("Sabang"),
            StationRef::new(20, 2, 1, 4.0, 96.2, "Cut Nyak Dhien").with_region_name("Nagan Raya"),
            StationRef::new(30, 5, 2, -8.7, 115.2, "Ngurah Rai").with_region_name("Badung"),
        ];
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let observations = [10, 11, 20, 30, 99]
            .into_iter()
            .map(|id| Observation::new(id, date, WeatherValues::new()))
            .collect();

        let join = HierarchyJoin::new();
        let joined_stations = join.join_stations(&stations, &provinces);
        let records = join.join_with_stations(observations, &joined_stations);
        (joined_stations, records)
    }

    fn ids(records: &[&JoinedRecord]) -> Vec<u32> {
        records.iter().map(|r| r.station_id).collect()
    }

    #[test]
    fn test_no_selection_is_identity() {
        let (_, records) = fixture();
        assert_eq!(filter_by_geo(&records, None, None, None).len(), records.len());
    }

    #[test]
    fn test_filter_by_each_level() {
        let (_, records) = fixture();

        assert_eq!(ids(&filter_by_geo(&records, Some("Aceh"), None, None)), vec![10, 11, 20]);
        assert_eq!(ids(&filter_by_geo(&records, Some("Aceh"), Some("Sabang"), None)), vec![10, 11]);
        assert_eq!(
            ids(&filter_by_geo(&records, Some("Aceh"), Some("Sabang"), Some("Sabang Harbor"))),
            vec![11]
        );
        assert_eq!(ids(&filter_by_geo(&records, None, None, Some("Ngurah Rai"))), vec![30]);
    }

    #[test]
    fn test_unknown_or_inconsistent_names_give_empty() {
        let (_, records) = fixture();
        assert!(filter_by_geo(&records, Some("Papua"), None, None).is_empty());
        // Badung is a Bali region
        assert!(filter_by_geo(&records, Some("Aceh"), Some("Badung"), None).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let (_, records) = fixture();
        let once = GeoSelection::new().with_province("Aceh").apply(&records);
        let twice = GeoSelection::new().apply(once.iter().copied());
        assert_eq!(once, twice);

        let refiltered = GeoSelection::new().with_province("Aceh").apply(once.iter().copied());
        assert_eq!(once, refiltered);
    }

    #[test]
    fn test_apply_stations() {
        let (stations, _) = fixture();
        let selected = GeoSelection::new().with_region("Sabang").apply_stations(&stations);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_selector_options_cascade() {
        let (stations, _) = fixture();

        let all = SelectorOptions::from_stations(&stations, &GeoSelection::new());
        assert_eq!(all.provinces, vec!["Aceh", "Bali"]);
        assert_eq!(all.regions, vec!["Badung", "Nagan Raya", "Sabang"]);
        assert_eq!(all.stations.len(), 4);

        let aceh = SelectorOptions::from_stations(&stations, &GeoSelection::new().with_province("Aceh"));
        assert_eq!(aceh.provinces, vec!["Aceh", "Bali"]);
        assert_eq!(aceh.regions, vec!["Nagan Raya", "Sabang"]);
        assert_eq!(aceh.stations, vec!["Cut Nyak Dhien", "Maimun Saleh", "Sabang Harbor"]);

        let sabang = SelectorOptions::from_stations(
            &stations,
            &GeoSelection::new().with_province("Aceh").with_region("Sabang"),
        );
        assert_eq!(sabang.stations, vec!["Maimun Saleh", "Sabang Harbor"]);
    }
}
