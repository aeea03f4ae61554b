use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::models::{GroupBy, Period, Variable, WeatherValues};

/// One reduced (group, time bucket) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub group: Option<Arc<str>>,
    pub date: NaiveDate,
    pub values: WeatherValues,
    pub observation_count: usize,
}

impl AggregatedRow {
    pub fn value(&self, variable: Variable) -> Option<f64> {
        self.values.get(variable)
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// Tidy series: one row per non-empty (group, bucket) cell, sorted by
/// (group, bucket) with unnamed groups last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub variable: Variable,
    pub period: Option<Period>,
    pub group_by: Option<GroupBy>,
    pub rows: Vec<AggregatedRow>,
}

impl AggregatedSeries {
    pub fn empty(variable: Variable, period: Option<Period>, group_by: Option<GroupBy>) -> Self {
        Self {
            variable,
            period,
            group_by,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (group, date, value) triples of the selected variable, ready to plot
    pub fn points(&self) -> Vec<(Option<&str>, NaiveDate, Option<f64>)> {
        self.points_for(self.variable)
    }

    pub fn points_for(&self, variable: Variable) -> Vec<(Option<&str>, NaiveDate, Option<f64>)> {
        self.rows
            .iter()
            .map(|row| (row.group_name(), row.date, row.value(variable)))
            .collect()
    }

    /// Distinct group names in series order
    pub fn groups(&self) -> Vec<Option<&str>> {
        let mut groups: Vec<Option<&str>> = Vec::new();
        for row in &self.rows {
            if groups.last() != Some(&row.group_name()) {
                groups.push(row.group_name());
            }
        }
        groups
    }

    /// Render rows as JSON objects keyed by column name, as the chart layer
    /// consumes them: `date`, the group label when grouped, then every variable
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                object.insert("date".to_string(), Value::String(row.date.to_string()));
                if let Some(group_by) = self.group_by {
                    let group = row
                        .group_name()
                        .map_or(Value::Null, |g| Value::String(g.to_string()));
                    object.insert(group_by.label().to_string(), group);
                }
                for (variable, value) in row.values.iter() {
                    let value = value
                        .and_then(serde_json::Number::from_f64)
                        .map_or(Value::Null, Value::Number);
                    object.insert(variable.column_name().to_string(), value);
                }
                Value::Object(object)
            })
            .collect();

        Value::Array(rows)
    }
}
