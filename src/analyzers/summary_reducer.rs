use crate::models::{AggregatedSeries, GroupBy, Variable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

/// Descriptive statistics of one variable's non-missing values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl Statistics {
    pub fn from_values(mut values: Vec<f64>) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::default();
        }

        values.sort_by(f64::total_cmp);

        let mean = values.iter().sum::<f64>() / count as f64;
        // Sample standard deviation (N-1)
        let std = (count >= 2).then(|| {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Self {
            count,
            mean: Some(mean),
            std,
            min: values.first().copied(),
            p25: Some(quantile(&values, 0.25)),
            p50: Some(quantile(&values, 0.50)),
            p75: Some(quantile(&values, 0.75)),
            max: values.last().copied(),
        }
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: Option<Arc<str>>,
    pub statistics: BTreeMap<Variable, Statistics>,
}

impl GroupSummary {
    pub fn get(&self, variable: Variable) -> Option<&Statistics> {
        self.statistics.get(&variable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub group_by: Option<GroupBy>,
    pub groups: Vec<GroupSummary>,
}

impl SeriesSummary {
    /// Statistics of one group; `None` selects the global (or unnamed) group
    pub fn get(&self, group: Option<&str>) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.group.as_deref() == group)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Describe every variable of `series`, per group when `group_by` is set
/// and over all rows otherwise.
pub fn summarize(series: &AggregatedSeries, group_by: Option<GroupBy>) -> SeriesSummary {
    // Keyed like the aggregation cells: named groups ascending, unnamed last
    let mut partitions: BTreeMap<(bool, Option<Arc<str>>), Vec<Vec<f64>>> = BTreeMap::new();

    for row in &series.rows {
        let group = group_by.and(row.group.clone());
        let unnamed = group_by.is_some() && group.is_none();
        let columns = partitions
            .entry((unnamed, group))
            .or_insert_with(|| vec![Vec::new(); Variable::ALL.len()]);
        for (variable, value) in row.values.iter() {
            if let Some(v) = value {
                columns[variable.index()].push(v);
            }
        }
    }

    let groups = partitions
        .into_iter()
        .map(|((_, group), columns)| GroupSummary {
            group,
            statistics: Variable::ALL
                .into_iter()
                .zip(columns)
                .map(|(variable, values)| (variable, Statistics::from_values(values)))
                .collect(),
        })
        .collect();

    SeriesSummary { group_by, groups }
}

/// Fixed-width rendering of a summary, one line per (group, variable)
pub fn summary_table(summary: &SeriesSummary) -> String {
    let mut table = String::new();
    let group_header = summary.group_by.map_or("", GroupBy::label);

    let _ = writeln!(
        table,
        "{:<24} {:<8} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        group_header, "variable", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );

    for group in &summary.groups {
        let name = group.group.as_deref().unwrap_or("-");
        for (variable, stats) in &group.statistics {
            let _ = writeln!(
                table,
                "{:<24} {:<8} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                name,
                variable.column_name(),
                stats.count,
                cell(stats.mean),
                cell(stats.std),
                cell(stats.min),
                cell(stats.p25),
                cell(stats.p50),
                cell(stats.p75),
                cell(stats.max),
            );
        }
    }

    table
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{:.3}", v))
}
