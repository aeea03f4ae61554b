use chrono::NaiveDate;
use climate_explorer::analyzers::{scatter_pairs, summarize};
use climate_explorer::models::{GroupBy, Period, TimeseriesRequest, Variable};
use climate_explorer::processors::{aggregate, filter_by_geo, GeoSelection};
use climate_explorer::{ClimateDataset, DataConfig, DuplicatePolicy, ProcessingError};
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const PROVINCES: &str = "province_id,province_name\n\
                         1,Aceh\n\
                         2,Bali\n";

const STATIONS: &str = "station_id,region_id,province_id,latitude,longitude,station_name,region_name\n\
                        96001,1,1,5.87655,95.33785,Maimun Saleh,Kota Sabang\n\
                        96015,2,1,4.04928,96.24881,Cut Nyak Dhien,Nagan Raya\n\
                        97230,5,2,-8.74817,115.16717,Ngurah Rai,Badung\n";

const OBSERVATIONS_HEADER: &str = "station_id,date,Tn,Tx,Tavg,RH_avg,RR,ss,ff_x,ddd_x,ff_avg,ddd_car";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_data_dir(observation_rows: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(dir.path().join("province_detail.csv"), PROVINCES).unwrap();
    fs::write(dir.path().join("station_detail.csv"), STATIONS).unwrap();

    let mut observations = String::from(OBSERVATIONS_HEADER);
    for row in observation_rows {
        observations.push('\n');
        observations.push_str(row);
    }
    observations.push('\n');
    fs::write(dir.path().join("climate_data.csv"), observations).unwrap();
    dir
}

fn sample_dataset() -> (TempDir, ClimateDataset) {
    let dir = write_data_dir(&[
        "97230,01/01/2020,24,31,27.5,81,12,4.2,8,270,3,W",
        "96001,01/01/2020,22,29,20,85,8888,5.1,6,90,2,E",
        "96015,01/01/2020,23,30,24,88,3,9999,7,180,3,S",
        "96001,05/01/2020,21,28,10,83,0,6,5,45,2,NE",
        "96001,20/01/2020,22,30,14,84,1,6.5,6,90,2,E",
        "96001,03/02/2020,21,27,,86,7,,5,,2,",
        "99999,01/01/2020,20,25,22,90,0,0,1,0,1,N",
    ]);
    let config = DataConfig::default().with_data_dir(dir.path());
    let dataset = ClimateDataset::load(&config).expect("sample data should load");
    (dir, dataset)
}

#[test]
fn test_load_join_keeps_every_observation() {
    init_tracing();
    let (_dir, dataset) = sample_dataset();

    assert_eq!(dataset.len(), 7);

    let orphan = dataset
        .records()
        .iter()
        .find(|r| r.station_id == 99999)
        .unwrap();
    assert!(!orphan.has_station());
    assert_eq!(orphan.province_name, None);
    assert_eq!(dataset.integrity_report().orphan_observations, 1);
}

#[test]
fn test_records_follow_hierarchy_order() {
    let (_dir, dataset) = sample_dataset();

    let keys: Vec<(u32, NaiveDate)> = dataset
        .records()
        .iter()
        .map(|r| (r.station_id, r.date))
        .collect();

    assert_eq!(
        keys,
        vec![
            (96001, date(2020, 1, 1)),
            (96001, date(2020, 1, 5)),
            (96001, date(2020, 1, 20)),
            (96001, date(2020, 2, 3)),
            (96015, date(2020, 1, 1)),
            (97230, date(2020, 1, 1)),
            (99999, date(2020, 1, 1)),
        ]
    );
}

#[test]
fn test_sentinels_load_as_missing() {
    let (_dir, dataset) = sample_dataset();
    let records = dataset.records();

    assert_eq!(records[0].value(Variable::Rr), None);
    assert_eq!(records[4].value(Variable::Ss), None);
    assert_eq!(records[3].value(Variable::Tavg), None);
}

#[test]
fn test_province_grouping_averages_stations_on_a_day() {
    let (_dir, dataset) = sample_dataset();
    let selection = GeoSelection::new().with_province("Aceh");

    let records: Vec<_> = dataset
        .filter_by_geo(&selection)
        .into_iter()
        .filter(|r| r.date == date(2020, 1, 1))
        .collect();
    let series = aggregate(records, Variable::Tavg, None, Some(GroupBy::Province));

    assert_eq!(
        series.points(),
        vec![(Some("Aceh"), date(2020, 1, 1), Some(22.0))]
    );
}

#[test]
fn test_monthly_series_for_a_station() {
    let (_dir, dataset) = sample_dataset();
    let request = TimeseriesRequest::parse("Tavg", Some("Monthly"), None).unwrap();

    let series = dataset.timeseries(
        &GeoSelection::new().with_station("Maimun Saleh"),
        &request,
    );

    // February's only Tavg reading is missing
    assert_eq!(
        series.points(),
        vec![
            (None, date(2020, 1, 1), Some(44.0 / 3.0)),
            (None, date(2020, 2, 1), None),
        ]
    );
}

#[test]
fn test_grouped_series_cover_all_records() {
    let (_dir, dataset) = sample_dataset();

    for group_by in [None, Some(GroupBy::Province), Some(GroupBy::Region), Some(GroupBy::Station)] {
        for period in [None, Some(Period::Weekly), Some(Period::Annually)] {
            let series = aggregate(dataset.records(), Variable::Tavg, period, group_by);
            let covered: usize = series.rows.iter().map(|r| r.observation_count).sum();
            assert_eq!(covered, dataset.len());
        }
    }

    let by_province = aggregate(dataset.records(), Variable::Tavg, None, Some(GroupBy::Province));
    assert_eq!(
        by_province.groups(),
        vec![Some("Aceh"), Some("Bali"), None]
    );
}

#[test]
fn test_geo_filter_is_idempotent() {
    let (_dir, dataset) = sample_dataset();

    let once = filter_by_geo(dataset.records(), Some("Aceh"), Some("Kota Sabang"), None);
    let selection = GeoSelection::new()
        .with_province("Aceh")
        .with_region("Kota Sabang");
    let twice = selection.apply(once.iter().copied());

    assert_eq!(once.len(), 4);
    assert_eq!(once, twice);
    assert!(filter_by_geo(dataset.records(), Some("Papua"), None, None).is_empty());
}

#[test]
fn test_summary_and_scatter() {
    let (_dir, dataset) = sample_dataset();
    let request = TimeseriesRequest::new(Variable::Tavg).with_group_by(GroupBy::Region);

    let (series, summary) = dataset.timeseries_summary(
        &GeoSelection::new().with_province("Aceh"),
        &request,
    );

    let sabang = summary
        .get(Some("Kota Sabang"))
        .and_then(|g| g.get(Variable::Tavg))
        .unwrap();
    assert_eq!(sabang.count, 3);
    assert_eq!(sabang.min, Some(10.0));
    assert_eq!(sabang.max, Some(20.0));
    assert_eq!(sabang.p50, Some(14.0));

    let nagan = summary.get(Some("Nagan Raya")).unwrap();
    assert_eq!(nagan.get(Variable::Tavg).unwrap().std, None);

    let pooled = summarize(&series, None);
    assert_eq!(pooled.groups.len(), 1);
    assert_eq!(pooled.get(None).unwrap().get(Variable::Tavg).unwrap().count, 4);

    let points = scatter_pairs(&series, Variable::Tavg, Variable::RhAvg);
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].group, Some(Arc::from("Kota Sabang")));
}

#[test]
fn test_selector_options_cascade() {
    let (_dir, dataset) = sample_dataset();

    let options = dataset.selector_options(&GeoSelection::new().with_province("Aceh"));
    assert_eq!(options.provinces, vec!["Aceh", "Bali"]);
    assert_eq!(options.regions, vec!["Kota Sabang", "Nagan Raya"]);
    assert_eq!(options.stations, vec!["Cut Nyak Dhien", "Maimun Saleh"]);
}

#[test]
fn test_duplicate_rows_follow_policy() {
    init_tracing();
    let dir = write_data_dir(&[
        "96001,01/01/2020,22,29,20,85,2,5.1,6,90,2,E",
        "96001,01/01/2020,22,29,24,85,4,5.1,6,90,2,E",
    ]);

    let config = DataConfig::default().with_data_dir(dir.path());
    let averaged = ClimateDataset::load(&config).unwrap();
    assert_eq!(averaged.len(), 1);
    assert_eq!(averaged.records()[0].value(Variable::Tavg), Some(22.0));
    assert_eq!(averaged.records()[0].value(Variable::Rr), Some(3.0));

    let kept = ClimateDataset::load(&config.clone().with_duplicate_policy(DuplicatePolicy::Keep)).unwrap();
    assert_eq!(kept.len(), 2);

    let rejected = ClimateDataset::load(&config.with_duplicate_policy(DuplicatePolicy::Reject));
    assert!(matches!(
        rejected,
        Err(ProcessingError::DuplicateObservation { station_id: 96001, .. })
    ));
}

#[test]
fn test_malformed_date_fails_load() {
    let dir = write_data_dir(&["96001,2020-01-01,22,29,20,85,2,5.1,6,90,2,E"]);
    let config = DataConfig::default().with_data_dir(dir.path());

    let err = ClimateDataset::load(&config).unwrap_err();
    assert!(matches!(err, ProcessingError::DataFormat { row: 1, .. }));
}

#[test]
fn test_unknown_variable_is_rejected() {
    let err = TimeseriesRequest::parse("pressure", None, None).unwrap_err();
    assert!(matches!(err, ProcessingError::UnknownColumn { .. }));
}

#[test]
fn test_series_json_for_chart() {
    let (_dir, dataset) = sample_dataset();
    let request = TimeseriesRequest::new(Variable::Tavg)
        .with_period(Period::Annually)
        .with_group_by(GroupBy::Province);

    let json = dataset.timeseries(&GeoSelection::new(), &request).to_json();
    let rows = json.as_array().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["Province"], "Aceh");
    assert_eq!(rows[0]["date"], "2020-01-01");
    assert!(rows[2]["Province"].is_null());
}

#[test]
fn test_dataset_shared_across_threads() {
    let (_dir, dataset) = sample_dataset();
    let dataset = Arc::new(dataset);
    let request = TimeseriesRequest::new(Variable::Tavg).with_period(Period::Monthly);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dataset = Arc::clone(&dataset);
            let request = request.clone();
            std::thread::spawn(move || dataset.timeseries(&GeoSelection::new(), &request).len())
        })
        .collect();

    let expected = dataset.timeseries(&GeoSelection::new(), &request).len();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
