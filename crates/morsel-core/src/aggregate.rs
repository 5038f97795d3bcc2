//! Daily aggregation and before/after period statistics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::region::RegionFilter;
use crate::store::SalesRecord;

/// Total sales for one calendar date under the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub sales: f64,
}

/// A statistic that may not be computable from the available data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Available(f64),
    /// The period is empty, the baseline is zero, or the value overflowed.
    InsufficientData,
}

impl Metric {
    pub fn value(self) -> Option<f64> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::InsufficientData => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Metric::Available(_))
    }
}

/// Non-finite values are treated as missing.
impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        value
            .filter(|v| v.is_finite())
            .map_or(Metric::InsufficientData, Metric::Available)
    }
}

/// Before/after comparison around the cutoff date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Mean daily sales strictly before the cutoff.
    pub mean_before: Metric,
    /// Mean daily sales on or after the cutoff.
    pub mean_after: Metric,
    /// `(after - before) / before * 100`.
    pub percent_change: Metric,
    pub days_before: usize,
    pub days_after: usize,
}

/// Mean daily sales, `None` for an empty period or a sum that overflowed.
fn mean(days: &[DailyAggregate]) -> Option<f64> {
    (!days.is_empty())
        .then(|| days.iter().map(|d| d.sales).sum::<f64>() / days.len() as f64)
        .filter(|m| m.is_finite())
}

impl PeriodSummary {
    /// Summarize `daily` (chronological) around `cutoff`.
    pub fn compute(daily: &[DailyAggregate], cutoff: NaiveDate) -> Self {
        let (before, after) = split_at_cutoff(daily, cutoff);
        let mean_before = mean(before);
        let mean_after = mean(after);

        let percent_change = match (mean_before, mean_after) {
            (Some(b), Some(a)) if b != 0.0 => Some((a - b) / b * 100.0),
            _ => None,
        }
        .filter(|p| p.is_finite());

        Self {
            mean_before: mean_before.into(),
            mean_after: mean_after.into(),
            percent_change: percent_change.into(),
            days_before: before.len(),
            days_after: after.len(),
        }
    }

    /// Whether both periods have data and the change is defined.
    pub fn is_complete(&self) -> bool {
        self.mean_before.is_available()
            && self.mean_after.is_available()
            && self.percent_change.is_available()
    }
}

/// Sum sales per date for records passing `filter`, ascending by date.
pub fn daily_totals(records: &[SalesRecord], filter: RegionFilter) -> Vec<DailyAggregate> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| filter.matches(r.region)) {
        *totals.entry(record.date).or_default() += record.sales;
    }

    totals
        .into_iter()
        .map(|(date, sales)| DailyAggregate { date, sales })
        .collect()
}

/// Split `daily` into the days before `cutoff` and the days from it on.
pub fn split_at_cutoff(
    daily: &[DailyAggregate],
    cutoff: NaiveDate,
) -> (&[DailyAggregate], &[DailyAggregate]) {
    let idx = daily.partition_point(|day| day.date < cutoff);
    daily.split_at(idx)
}
