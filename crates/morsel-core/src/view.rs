//! The view model: everything one dashboard render needs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{DailyAggregate, PeriodSummary, daily_totals};
use crate::insight::Direction;
use crate::region::RegionFilter;
use crate::store::SalesRecord;

/// Date of the Pink Morsel price increase.
pub const PRICE_INCREASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 15) {
    Some(date) => date,
    None => panic!("invalid price increase date"),
};

/// Chart series and summary statistics for one region filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub filter: RegionFilter,
    /// `All Regions` or the capitalized region name.
    pub region_label: String,
    pub cutoff: NaiveDate,
    /// Daily totals, ascending by date.
    pub series: Vec<DailyAggregate>,
    pub summary: PeriodSummary,
}

impl ViewModel {
    pub fn direction(&self) -> Option<Direction> {
        self.summary.percent_change.value().and_then(Direction::of)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Aggregate `records` under `filter` and compare the periods around `cutoff`.
///
/// Pure: the same inputs always produce the same view, and `records` is
/// only read.
pub fn compute_view(records: &[SalesRecord], filter: RegionFilter, cutoff: NaiveDate) -> ViewModel {
    let series = daily_totals(records, filter);
    let summary = PeriodSummary::compute(&series, cutoff);

    tracing::debug!(
        region = filter.slug(),
        days = series.len(),
        complete = summary.is_complete(),
        "computed view"
    );

    ViewModel {
        filter,
        region_label: filter.label().to_string(),
        cutoff,
        series,
        summary,
    }
}
