use crate::models::{AggregatedSeries, Variable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub group: Option<Arc<str>>,
    pub date: NaiveDate,
    pub x: f64,
    pub y: f64,
}

/// Pair two variables of an aggregated series, skipping rows missing either
pub fn scatter_pairs(series: &AggregatedSeries, x: Variable, y: Variable) -> Vec<ScatterPoint> {
    series
        .rows
        .iter()
        .filter_map(|row| {
            Some(ScatterPoint {
                group: row.group.clone(),
                date: row.date,
                x: row.value(x)?,
                y: row.value(y)?,
            })
        })
        .collect()
}
