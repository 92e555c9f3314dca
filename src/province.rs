//! Province classification and the filter the province list drives.

use crate::constants::{ALL_FILTER, ALL_LABEL, DOMESTIC_PROVINCES, OTHER_FILTER, OTHER_LABEL};
use crate::types::Club;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

static DOMESTIC: Lazy<HashSet<&'static str>> = Lazy::new(|| DOMESTIC_PROVINCES.into_iter().collect());

/// Exact-match test against the fixed domestic set.
pub fn is_domestic(province: &str) -> bool {
    DOMESTIC.contains(province)
}

/// Current province filter. Any value may follow any other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProvinceFilter {
    #[default]
    None,
    All,
    /// Catch-all bucket: absent or non-domestic province
    Other,
    Province(String),
}

impl ProvinceFilter {
    /// Parse a filter value as carried by the province list.
    pub fn from_value(value: &str) -> Self {
        match value {
            ALL_FILTER => ProvinceFilter::All,
            OTHER_FILTER => ProvinceFilter::Other,
            other => ProvinceFilter::Province(other.to_string()),
        }
    }

    /// Value used in the page and in `ProvinceSelected` events
    pub fn value(&self) -> Option<&str> {
        match self {
            ProvinceFilter::None => None,
            ProvinceFilter::All => Some(ALL_FILTER),
            ProvinceFilter::Other => Some(OTHER_FILTER),
            ProvinceFilter::Province(p) => Some(p),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProvinceFilter::None | ProvinceFilter::All => ALL_LABEL,
            ProvinceFilter::Other => OTHER_LABEL,
            ProvinceFilter::Province(p) => p,
        }
    }

    /// Membership test, ignoring coordinates.
    pub fn matches(&self, club: &Club) -> bool {
        match self {
            ProvinceFilter::None | ProvinceFilter::All => true,
            ProvinceFilter::Other => club.province().map_or(true, |p| !is_domestic(p)),
            ProvinceFilter::Province(p) => club.province.as_deref() == Some(p.as_str()),
        }
    }
}

impl fmt::Display for ProvinceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or("none"))
    }
}

/// Distinct non-empty provinces present in `clubs`, domestic ones first,
/// each partition in code-point order.
pub fn ordered_provinces(clubs: &[Club]) -> Vec<String> {
    let distinct: BTreeSet<&str> = clubs.iter().filter_map(Club::province).collect();
    let (mut ordered, foreign): (Vec<&str>, Vec<&str>) = distinct.into_iter().partition(|p| is_domestic(p));
    ordered.extend(foreign);
    ordered.into_iter().map(str::to_string).collect()
}
