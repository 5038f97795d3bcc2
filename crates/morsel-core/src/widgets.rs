//! Interactive control definitions for the dashboard.
//!
//! The region filter is described as a widget so the page renderer and the
//! WebSocket protocol agree on its id, its options and how a submitted
//! value maps back to a [`RegionFilter`].

use serde::{Deserialize, Serialize};

use crate::region::RegionFilter;

/// Element id of the region filter control.
pub const REGION_FILTER_ID: &str = "region-filter";

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetOption {
    /// Submitted value.
    pub value: String,
    /// Human-readable label.
    pub label: String,
}

/// Widget definition sent to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetDef {
    /// Group of mutually exclusive radio buttons.
    Radio {
        /// Unique widget ID on the page.
        id: String,
        /// Human-readable label.
        label: String,
        /// Available options, in display order.
        options: Vec<WidgetOption>,
        /// Currently selected index.
        selected: usize,
    },
}

/// Widget value submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetValue {
    /// Option index.
    Index(usize),
    /// Option value.
    Text(String),
}

/// The region filter control with `selected` checked.
pub fn region_filter(selected: RegionFilter) -> WidgetDef {
    let options = RegionFilter::CHOICES
        .iter()
        .map(|choice| WidgetOption {
            value: choice.slug().to_string(),
            label: choice.label().to_string(),
        })
        .collect();

    let selected = RegionFilter::CHOICES
        .iter()
        .position(|choice| *choice == selected)
        .unwrap_or(0);

    WidgetDef::Radio {
        id: REGION_FILTER_ID.to_string(),
        label: "Region".to_string(),
        options,
        selected,
    }
}

/// Resolve a submitted value into a filter.
///
/// Unknown text and out-of-range indices fall back to [`RegionFilter::All`].
pub fn resolve_region_filter(value: &WidgetValue) -> RegionFilter {
    match value {
        WidgetValue::Index(i) => RegionFilter::CHOICES.get(*i).copied().unwrap_or_else(|| {
            tracing::warn!("region filter index {i} out of range, showing all regions");
            RegionFilter::All
        }),
        WidgetValue::Text(text) => RegionFilter::parse_or_all(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    #[test]
    fn test_region_filter_options() {
        let WidgetDef::Radio {
            id,
            options,
            selected,
            ..
        } = region_filter(RegionFilter::Only(Region::South));

        assert_eq!(id, REGION_FILTER_ID);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["All Regions", "North", "East", "South", "West"]);
        assert_eq!(options[selected].value, "south");
    }

    #[test]
    fn test_default_selection_is_all() {
        let WidgetDef::Radio { selected, .. } = region_filter(RegionFilter::default());
        assert_eq!(selected, 0);
    }

    #[test]
    fn test_resolve_values() {
        assert_eq!(
            resolve_region_filter(&WidgetValue::Text("west".into())),
            RegionFilter::Only(Region::West)
        );
        assert_eq!(
            resolve_region_filter(&WidgetValue::Index(1)),
            RegionFilter::Only(Region::North)
        );
        assert_eq!(resolve_region_filter(&WidgetValue::Index(9)), RegionFilter::All);
        assert_eq!(
            resolve_region_filter(&WidgetValue::Text("mars".into())),
            RegionFilter::All
        );
    }

    #[test]
    fn test_widget_value_untagged() {
        let v: WidgetValue = serde_json::from_str("2").unwrap();
        assert_eq!(v, WidgetValue::Index(2));
        let v: WidgetValue = serde_json::from_str("\"east\"").unwrap();
        assert_eq!(v, WidgetValue::Text("east".to_string()));
    }
}
