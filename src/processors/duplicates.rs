use crate::config::DuplicatePolicy;
use crate::error::{ProcessingError, Result};
use crate::models::{MeanAccumulator, Observation};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

/// Apply `policy` to observations sharing a (station_id, date) key.
/// Output keeps the order in which each key was first seen.
pub fn resolve_duplicates(
    observations: Vec<Observation>,
    policy: DuplicatePolicy,
) -> Result<Vec<Observation>> {
    match policy {
        DuplicatePolicy::Keep => Ok(observations),
        DuplicatePolicy::Reject => {
            if let Some((station_id, date)) = first_duplicate(&observations) {
                return Err(ProcessingError::DuplicateObservation { station_id, date });
            }
            Ok(observations)
        }
        DuplicatePolicy::Average => Ok(average_duplicates(observations)),
    }
}

fn first_duplicate(observations: &[Observation]) -> Option<(u32, NaiveDate)> {
    let mut seen = std::collections::HashSet::with_capacity(observations.len());
    observations
        .iter()
        .map(Observation::key)
        .find(|key| !seen.insert(*key))
}

fn average_duplicates(observations: Vec<Observation>) -> Vec<Observation> {
    if first_duplicate(&observations).is_none() {
        return observations;
    }

    let input_len = observations.len();
    let mut index_by_key: HashMap<(u32, NaiveDate), usize> = HashMap::with_capacity(input_len);
    let mut merged: Vec<(Observation, MeanAccumulator)> = Vec::with_capacity(input_len);

    for observation in observations {
        match index_by_key.get(&observation.key()) {
            Some(&i) => {
                let (first, accumulator) = &mut merged[i];
                accumulator.push(&observation.values);
                if first.wind_direction.is_none() {
                    first.wind_direction = observation.wind_direction;
                }
            }
            None => {
                let mut accumulator = MeanAccumulator::default();
                accumulator.push(&observation.values);
                index_by_key.insert(observation.key(), merged.len());
                merged.push((observation, accumulator));
            }
        }
    }

    warn!(
        "Averaged {} duplicate station-day observations",
        input_len - merged.len()
    );

    merged
        .into_iter()
        .map(|(mut observation, accumulator)| {
            observation.values = accumulator.finish();
            observation
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Variable, WeatherValues};

    fn observation(station_id: u32, day: u32, values: WeatherValues) -> Observation {
        Observation::new(station_id, NaiveDate::from_ymd_opt(2020, 1, day).unwrap(), values)
    }

    fn with_duplicates() -> Vec<Observation> {
        vec![
            observation(1, 1, WeatherValues::new().with(Variable::Tavg, 20.0)),
            observation(2, 1, WeatherValues::new().with(Variable::Tavg, 30.0)),
            observation(
                1,
                1,
                WeatherValues::new()
                    .with(Variable::Tavg, 22.0)
                    .with(Variable::Rr, 4.0),
            ),
        ]
    }

    #[test]
    fn test_keep_leaves_duplicates() {
        let resolved = resolve_duplicates(with_duplicates(), DuplicatePolicy::Keep).unwrap();
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn test_reject_fails_on_first_duplicate() {
        let err = resolve_duplicates(with_duplicates(), DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::DuplicateObservation { station_id: 1, .. }
        ));
    }

    #[test]
    fn test_average_collapses_per_variable() {
        let resolved = resolve_duplicates(with_duplicates(), DuplicatePolicy::Average).unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].station_id, 1);
        assert_eq!(resolved[0].value(Variable::Tavg), Some(21.0));
        // Only one duplicate carried rainfall
        assert_eq!(resolved[0].value(Variable::Rr), Some(4.0));
        assert_eq!(resolved[1].station_id, 2);
    }

    #[test]
    fn test_unique_input_passes_through() {
        let input = vec![
            observation(1, 1, WeatherValues::new()),
            observation(1, 2, WeatherValues::new()),
        ];
        for policy in [DuplicatePolicy::Keep, DuplicatePolicy::Reject, DuplicatePolicy::Average] {
            assert_eq!(resolve_duplicates(input.clone(), policy).unwrap(), input);
        }
    }
}
