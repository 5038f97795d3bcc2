//! Core engine for the Pink Morsel sales dashboard.
//!
//! This crate provides:
//! - Loading sales records from CSV into an immutable [`SalesStore`]
//! - Daily aggregation under a [`RegionFilter`]
//! - Before/after comparison around the price increase date
//! - The [`ViewModel`] and its narrative insight
//!
//! Everything here is pure computation over in-memory data; the HTTP
//! layer lives in `morsel-server`.

pub mod aggregate;
pub mod error;
pub mod insight;
pub mod region;
pub mod store;
pub mod view;
pub mod widgets;

pub use aggregate::{DailyAggregate, Metric, PeriodSummary, daily_totals, split_at_cutoff};
pub use error::{Error, Result};
pub use insight::{Direction, narrative};
pub use region::{Region, RegionFilter, UnknownRegion};
pub use store::{SalesRecord, SalesStore};
pub use view::{PRICE_INCREASE_DATE, ViewModel, compute_view};
