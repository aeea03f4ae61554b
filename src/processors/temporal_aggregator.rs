use crate::error::Result;
use crate::models::{
    AggregatedRow, AggregatedSeries, GroupBy, JoinedRecord, MeanAccumulator, Period, Variable,
};
use crate::utils::dates::{month_start, quarter_start, week_start, year_start};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Start of the bucket `date` falls in; the date itself when unbucketed
pub fn bucket_start(date: NaiveDate, period: Option<Period>) -> NaiveDate {
    match period {
        None | Some(Period::Daily) => date,
        Some(Period::Weekly) => week_start(date),
        Some(Period::Monthly) => month_start(date),
        Some(Period::Quarterly) => quarter_start(date),
        Some(Period::Annually) => year_start(date),
    }
}

/// (group, bucket) cell key. Field order gives the output order: named
/// groups ascending, then the unnamed group, then bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CellKey {
    unnamed: bool,
    group: Option<Arc<str>>,
    bucket: NaiveDate,
}

impl CellKey {
    fn for_record(record: &JoinedRecord, period: Option<Period>, group_by: Option<GroupBy>) -> Self {
        let group = group_by.and_then(|level| record.group_name(level).cloned());
        Self {
            unnamed: group_by.is_some() && group.is_none(),
            group,
            bucket: bucket_start(record.date, period),
        }
    }
}

#[derive(Default)]
struct Cell {
    means: MeanAccumulator,
    observation_count: usize,
}

/// Reduce records to one row per non-empty (group, bucket) cell.
///
/// Every weather variable is averaged over the cell, skipping missing values,
/// so the series can be re-plotted for another variable without re-running.
/// `variable` only marks which one the caller is interested in.
pub fn aggregate<'a, I>(
    records: I,
    variable: Variable,
    period: Option<Period>,
    group_by: Option<GroupBy>,
) -> AggregatedSeries
where
    I: IntoIterator<Item = &'a JoinedRecord>,
{
    let mut cells: BTreeMap<CellKey, Cell> = BTreeMap::new();
    let mut input_len = 0usize;

    for record in records {
        input_len += 1;
        let cell = cells
            .entry(CellKey::for_record(record, period, group_by))
            .or_default();
        cell.means.push(&record.values);
        cell.observation_count += 1;
    }

    let rows: Vec<AggregatedRow> = cells
        .into_iter()
        .map(|(key, cell)| AggregatedRow {
            group: key.group,
            date: key.bucket,
            values: cell.means.finish(),
            observation_count: cell.observation_count,
        })
        .collect();

    debug!(
        "Aggregated {} records into {} rows (variable={}, period={:?}, group_by={:?})",
        input_len,
        rows.len(),
        variable,
        period,
        group_by
    );

    AggregatedSeries {
        variable,
        period,
        group_by,
        rows,
    }
}

/// [`aggregate`] with the variable given by column name or label
pub fn aggregate_by_name<'a, I>(
    records: I,
    variable: &str,
    period: Option<Period>,
    group_by: Option<GroupBy>,
) -> Result<AggregatedSeries>
where
    I: IntoIterator<Item = &'a JoinedRecord>,
{
    let variable: Variable = variable.parse()?;
    Ok(aggregate(records, variable, period, group_by))
}
