//! # Route Filter
//!
//! Pure predicates over [`Route`] values.
//!
//! [`matches`] evaluates the listing filters (minimum distance, difficulty
//! set, region). [`QuickFilter`] covers the preset chips shown above the
//! route listing.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::WalkConfig;
use crate::{Difficulty, Route};

/// Sentinel region value meaning "no region constraint".
pub const ALL_REGIONS: &str = "all";

// ============================================================================
// Region Filter
// ============================================================================

/// Region constraint of a [`FilterCriteria`].
///
/// Serialized as a plain string, with `"all"` standing for [`RegionFilter::All`].
/// A `null` region reads as `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    /// Exact, case-sensitive region tag
    Named(String),
}

impl RegionFilter {
    pub fn from_value(value: &str) -> Self {
        if value == ALL_REGIONS {
            RegionFilter::All
        } else {
            RegionFilter::Named(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegionFilter::All => ALL_REGIONS,
            RegionFilter::Named(region) => region,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RegionFilter::All)
    }

    /// Whether a route's optional region passes this filter.
    pub fn accepts(&self, region: Option<&str>) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Named(selected) => region == Some(selected.as_str()),
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RegionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RegionFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map_or(RegionFilter::All, |v| RegionFilter::from_value(&v)))
    }
}

// ============================================================================
// Filter Criteria
// ============================================================================

/// Filters applied to a route listing.
///
/// Values are not validated: a negative minimum distance simply lets every
/// route through the distance gate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Inclusive minimum length in kilometers. Default: 0.0
    pub minimum_distance_km: f64,
    /// Accepted difficulties; empty accepts all. Default: empty
    pub selected_difficulties: BTreeSet<Difficulty>,
    /// Default: all regions
    pub selected_region: RegionFilter,
}

impl FilterCriteria {
    pub fn with_minimum_distance(mut self, km: f64) -> Self {
        self.minimum_distance_km = km;
        self
    }

    pub fn with_difficulties<I: IntoIterator<Item = Difficulty>>(mut self, difficulties: I) -> Self {
        self.selected_difficulties = difficulties.into_iter().collect();
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.selected_region = RegionFilter::from_value(region);
        self
    }

    /// Add `difficulty` to the selection, or remove it if already selected.
    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        if !self.selected_difficulties.remove(&difficulty) {
            self.selected_difficulties.insert(difficulty);
        }
    }

    /// Restore the defaults (no constraints).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no dimension constrains the listing.
    pub fn is_default(&self) -> bool {
        self.minimum_distance_km <= 0.0
            && self.selected_difficulties.is_empty()
            && self.selected_region.is_all()
    }
}

/// Check a route against every gate of `criteria`.
///
/// - distance: `distance_km >= minimum` (absent distance counts as 0)
/// - difficulty: member of the selection, unless the selection is empty
/// - region: exact match, unless the filter is "all"
pub fn matches(route: &Route, criteria: &FilterCriteria) -> bool {
    route.effective_distance_km() >= criteria.minimum_distance_km
        && (criteria.selected_difficulties.is_empty()
            || criteria.selected_difficulties.contains(&route.difficulty))
        && criteria.selected_region.accepts(route.region.as_deref())
}

// ============================================================================
// Quick Filters
// ============================================================================

/// Preset filter chips of the route listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickFilter {
    #[default]
    All,
    Easy,
    Hard,
    /// Shorter than `short_max_km`
    Short,
    /// At least `long_min_km`
    Long,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 5] = [
        QuickFilter::All,
        QuickFilter::Easy,
        QuickFilter::Hard,
        QuickFilter::Short,
        QuickFilter::Long,
    ];

    /// Parse a chip id. Unknown ids fall back to `All`.
    pub fn from_id(id: &str) -> Self {
        QuickFilter::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .unwrap_or_default()
    }

    pub fn id(&self) -> &'static str {
        match self {
            QuickFilter::All => "all",
            QuickFilter::Easy => "easy",
            QuickFilter::Hard => "hard",
            QuickFilter::Short => "short",
            QuickFilter::Long => "long",
        }
    }

    /// Chip label as shown in the app.
    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::All => "Alle Routes",
            QuickFilter::Easy => "Ontspannen",
            QuickFilter::Hard => "Uitdagend",
            QuickFilter::Short => "Korte Wandeling (<5km)",
            QuickFilter::Long => "Stevige Tocht (10km+)",
        }
    }

    pub fn accepts(&self, route: &Route, config: &WalkConfig) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::Easy => route.difficulty == Difficulty::Easy,
            QuickFilter::Hard => route.difficulty == Difficulty::Hard,
            QuickFilter::Short => route.effective_distance_km() < config.short_max_km,
            QuickFilter::Long => route.effective_distance_km() >= config.long_min_km,
        }
    }
}
