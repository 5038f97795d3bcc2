//! Narrative text and number formatting for a [`ViewModel`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::aggregate::Metric;
use crate::view::ViewModel;

/// Which way average daily sales moved after the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increased,
    Decreased,
    Unchanged,
}

impl Direction {
    /// Direction of a percentage change, `None` for NaN.
    pub fn of(percent_change: f64) -> Option<Self> {
        match percent_change.partial_cmp(&0.0)? {
            Ordering::Greater => Some(Direction::Increased),
            Ordering::Less => Some(Direction::Decreased),
            Ordering::Equal => Some(Direction::Unchanged),
        }
    }

    /// Verb used in the insight sentence.
    pub fn verb(self) -> &'static str {
        match self {
            Direction::Increased => "increased",
            Direction::Decreased => "decreased",
            Direction::Unchanged => "did not change",
        }
    }

    /// Comparative used in the headline sentence.
    pub fn comparative(self) -> &'static str {
        match self {
            Direction::Increased => "HIGHER",
            Direction::Decreased => "LOWER",
            Direction::Unchanged => "UNCHANGED",
        }
    }
}

/// `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// `+12.34%` / `-5.00%`
pub fn format_percent(percent: f64) -> String {
    format!("{percent:+.2}%")
}

/// Currency for available metrics, `Not enough data` otherwise.
pub fn format_metric_currency(metric: Metric) -> String {
    metric
        .value()
        .map(format_currency)
        .unwrap_or_else(|| NOT_ENOUGH_DATA.to_string())
}

/// Signed percentage for available metrics, `Not enough data` otherwise.
pub fn format_metric_percent(metric: Metric) -> String {
    metric
        .value()
        .map(format_percent)
        .unwrap_or_else(|| NOT_ENOUGH_DATA.to_string())
}

/// Placeholder for statistics that cannot be computed.
pub const NOT_ENOUGH_DATA: &str = "Not enough data";

fn day_count(days: usize) -> String {
    match days {
        1 => "1 day".to_string(),
        n => format!("{n} days"),
    }
}

/// The business insight sentence for a view.
pub fn narrative(view: &ViewModel) -> String {
    let date = view.cutoff.format("%B %-d, %Y");
    let summary = &view.summary;

    let (Some(before), Some(after), Some(change), Some(direction)) = (
        summary.mean_before.value(),
        summary.mean_after.value(),
        summary.percent_change.value(),
        view.direction(),
    ) else {
        return format!(
            "{}: not enough data to compare average daily sales before and after the price increase on {date} \
             ({} before, {} after).",
            view.region_label,
            day_count(summary.days_before),
            day_count(summary.days_after)
        );
    };

    match direction {
        Direction::Unchanged => format!(
            "{}: Sales were {} after the price increase on {date}. \
             The average daily sales {} and stayed at {}.",
            view.region_label,
            direction.comparative(),
            direction.verb(),
            format_currency(after),
        ),
        Direction::Increased | Direction::Decreased => format!(
            "{}: Sales were {} after the price increase on {date}. \
             The average daily sales {} by {:.2}%, from {} to {}.",
            view.region_label,
            direction.comparative(),
            direction.verb(),
            change.abs(),
            format_currency(before),
            format_currency(after),
        ),
    }
}
