//! Sales regions and the region filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed sales regions present in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    East,
    South,
    West,
}

impl Region {
    /// All regions, in display order.
    pub const ALL: [Region; 4] = [Region::North, Region::East, Region::South, Region::West];

    /// Lowercase identifier used in the data file and on the wire.
    pub fn slug(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::East => "east",
            Region::South => "south",
            Region::West => "west",
        }
    }

    /// Capitalized display name.
    pub fn label(self) -> &'static str {
        match self {
            Region::North => "North",
            Region::East => "East",
            Region::South => "South",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known region.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region: {0:?}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.slug().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRegion(trimmed.to_string()))
    }
}

/// Restricts which records contribute to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RegionFilter {
    /// Every record, regardless of region.
    #[default]
    All,
    /// Only records from one region.
    Only(Region),
}

impl RegionFilter {
    /// Every filter choice, in the order the control lists them.
    pub const CHOICES: [RegionFilter; 5] = [
        RegionFilter::All,
        RegionFilter::Only(Region::North),
        RegionFilter::Only(Region::East),
        RegionFilter::Only(Region::South),
        RegionFilter::Only(Region::West),
    ];

    /// Whether a record from `region` passes this filter.
    pub fn matches(self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(selected) => selected == region,
        }
    }

    /// Wire value: `all` or the region slug.
    pub fn slug(self) -> &'static str {
        match self {
            RegionFilter::All => "all",
            RegionFilter::Only(region) => region.slug(),
        }
    }

    /// Display label: `All Regions` or the capitalized region name.
    pub fn label(self) -> &'static str {
        match self {
            RegionFilter::All => "All Regions",
            RegionFilter::Only(region) => region.label(),
        }
    }

    /// Parse a user-supplied value, falling back to [`RegionFilter::All`]
    /// for anything unrecognized.
    pub fn parse_or_all(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: UnknownRegion| {
            tracing::warn!("{err}, showing all regions");
            RegionFilter::All
        })
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegionFilter {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all regions") {
            return Ok(RegionFilter::All);
        }
        trimmed.parse().map(RegionFilter::Only)
    }
}

impl From<RegionFilter> for String {
    fn from(filter: RegionFilter) -> Self {
        filter.slug().to_string()
    }
}

impl TryFrom<String> for RegionFilter {
    type Error = UnknownRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("north".parse::<Region>(), Ok(Region::North));
        assert_eq!(" WEST ".parse::<Region>(), Ok(Region::West));
        assert!("central".parse::<Region>().is_err());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<RegionFilter>(), Ok(RegionFilter::All));
        assert_eq!("All Regions".parse::<RegionFilter>(), Ok(RegionFilter::All));
        assert_eq!(
            "South".parse::<RegionFilter>(),
            Ok(RegionFilter::Only(Region::South))
        );
    }

    #[test]
    fn test_unknown_filter_falls_back_to_all() {
        assert_eq!(RegionFilter::parse_or_all("atlantis"), RegionFilter::All);
        assert_eq!(
            RegionFilter::parse_or_all("east"),
            RegionFilter::Only(Region::East)
        );
    }

    #[test]
    fn test_filter_labels() {
        let labels: Vec<_> = RegionFilter::CHOICES.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["All Regions", "North", "East", "South", "West"]);
    }

    #[test]
    fn test_filter_matches() {
        assert!(RegionFilter::All.matches(Region::West));
        assert!(RegionFilter::Only(Region::North).matches(Region::North));
        assert!(!RegionFilter::Only(Region::North).matches(Region::South));
    }

    #[test]
    fn test_filter_serializes_as_slug() {
        let json = serde_json::to_string(&RegionFilter::Only(Region::East)).unwrap();
        assert_eq!(json, "\"east\"");
        let parsed: RegionFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, RegionFilter::All);
    }
}
