use crate::models::{Observation, Variable};
use crate::readers::ReferenceData;
use crate::utils::constants::{MAX_RELATIVE_HUMIDITY, MAX_REPORTED_ISSUES, MAX_WIND_DIRECTION};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub total_observations: usize,
    pub duplicate_observations: usize,
    pub duplicate_keys: Vec<(u32, NaiveDate)>,
    pub duplicate_station_ids: Vec<u32>,
    pub orphan_observations: usize,
    pub unknown_station_ids: Vec<u32>,
    pub orphan_stations: Vec<u32>,
    pub violation_count: usize,
    pub value_violations: Vec<ValueViolation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_observations == 0
            && self.duplicate_station_ids.is_empty()
            && self.orphan_observations == 0
            && self.orphan_stations.is_empty()
            && self.violation_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueViolation {
    pub station_id: u32,
    pub date: NaiveDate,
    pub variable: Variable,
    pub value: f64,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    OutOfRange,
    Negative,
    MinGreaterThanMax,
}

/// Inspects raw reference tables for problems that do not stop a load.
/// The checker never fails; callers decide what to do with the report.
pub struct IntegrityChecker {
    max_reported: usize,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            max_reported: MAX_REPORTED_ISSUES,
        }
    }

    pub fn with_max_reported(max_reported: usize) -> Self {
        Self { max_reported }
    }

    pub fn check(&self, data: &ReferenceData) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_observations: data.observations.len(),
            ..IntegrityReport::default()
        };

        self.check_stations(data, &mut report);
        self.check_observation_keys(data, &mut report);

        for observation in &data.observations {
            self.check_values(observation, &mut report);
        }

        report
    }

    /// Stations listed twice, and stations pointing at an unknown province
    fn check_stations(&self, data: &ReferenceData, report: &mut IntegrityReport) {
        let province_ids: HashSet<u16> = data.provinces.iter().map(|p| p.province_id).collect();

        let mut seen = HashSet::with_capacity(data.stations.len());
        let mut duplicates = BTreeSet::new();
        let mut orphans = BTreeSet::new();

        for station in &data.stations {
            if !seen.insert(station.station_id) {
                duplicates.insert(station.station_id);
            }
            if !province_ids.contains(&station.province_id) {
                orphans.insert(station.station_id);
            }
        }

        report.duplicate_station_ids = duplicates.into_iter().collect();
        report.orphan_stations = orphans.into_iter().collect();
    }

    /// Repeated (station_id, date) keys, and observations of unknown stations
    fn check_observation_keys(&self, data: &ReferenceData, report: &mut IntegrityReport) {
        let station_ids: HashSet<u32> = data.stations.iter().map(|s| s.station_id).collect();

        let mut seen = HashSet::with_capacity(data.observations.len());
        let mut unknown = BTreeSet::new();

        for observation in &data.observations {
            let key = observation.key();
            if !seen.insert(key) {
                report.duplicate_observations += 1;
                if report.duplicate_keys.len() < self.max_reported {
                    report.duplicate_keys.push(key);
                }
            }
            if !station_ids.contains(&observation.station_id) {
                report.orphan_observations += 1;
                unknown.insert(observation.station_id);
            }
        }

        report.unknown_station_ids = unknown.into_iter().collect();
    }

    fn check_values(&self, observation: &Observation, report: &mut IntegrityReport) {
        for (variable, value) in observation.values.iter() {
            let Some(value) = value else { continue };

            let violation = match variable {
                Variable::RhAvg if !(0.0..=MAX_RELATIVE_HUMIDITY).contains(&value) => Some((
                    ViolationType::OutOfRange,
                    format!(
                        "relative humidity {} is outside [0, {}]",
                        value, MAX_RELATIVE_HUMIDITY
                    ),
                )),
                Variable::DddX if !(0.0..=MAX_WIND_DIRECTION).contains(&value) => Some((
                    ViolationType::OutOfRange,
                    format!(
                        "wind direction {} is outside [0, {}]",
                        value, MAX_WIND_DIRECTION
                    ),
                )),
                Variable::Rr | Variable::Ss | Variable::FfX | Variable::FfAvg if value < 0.0 => {
                    Some((
                        ViolationType::Negative,
                        format!("{} is negative ({})", variable.label(), value),
                    ))
                }
                _ => None,
            };

            if let Some((violation_type, details)) = violation {
                self.record_violation(observation, variable, value, violation_type, details, report);
            }
        }

        if let (Some(tn), Some(tx)) = (
            observation.value(Variable::Tn),
            observation.value(Variable::Tx),
        ) {
            if tn > tx {
                self.record_violation(
                    observation,
                    Variable::Tn,
                    tn,
                    ViolationType::MinGreaterThanMax,
                    format!("min temperature {} exceeds max temperature {}", tn, tx),
                    report,
                );
            }
        }
    }

    fn record_violation(
        &self,
        observation: &Observation,
        variable: Variable,
        value: f64,
        violation_type: ViolationType,
        details: String,
        report: &mut IntegrityReport,
    ) {
        report.violation_count += 1;
        if report.value_violations.len() < self.max_reported {
            report.value_violations.push(ValueViolation {
                station_id: observation.station_id,
                date: observation.date,
                variable,
                value,
                violation_type,
                details,
            });
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!(
            "Total Observations: {}\n",
            report.total_observations
        ));
        summary.push_str(&format!(
            "Duplicate Observations: {}\n",
            report.duplicate_observations
        ));
        for (station_id, date) in &report.duplicate_keys {
            summary.push_str(&format!("  Station {} on {}\n", station_id, date));
        }
        summary.push_str(&format!(
            "Duplicate Station IDs: {}\n",
            report.duplicate_station_ids.len()
        ));
        summary.push_str(&format!(
            "Observations Without Station: {} (station ids: {:?})\n",
            report.orphan_observations, report.unknown_station_ids
        ));
        summary.push_str(&format!(
            "Stations Without Province: {}\n",
            report.orphan_stations.len()
        ));
        summary.push_str(&format!("\nValue Violations: {}\n", report.violation_count));

        if !report.value_violations.is_empty() {
            summary.push_str(&format!("\nFirst {} Violations:\n", report.value_violations.len()));
            for (i, violation) in report.value_violations.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. Station {} on {}: {}\n",
                    i + 1,
                    violation.station_id,
                    violation.date,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
