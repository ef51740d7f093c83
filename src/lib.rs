//! # SammieWalk
//!
//! Client-side core of the SammieWalk hiking-route app.
//!
//! This library provides:
//! - Favorited routes persisted in a key-value store
//! - Route filtering by distance, difficulty and region
//! - The route views the app renders (filtered, saved, featured, similar)
//! - Node-sequence parsing and GPX track bounds for route pages
//!
//! ## Features
//!
//! - **`persistence`** (default) - SQLite-backed key-value store for favorites
//!
//! ## Quick Start
//!
//! ```rust
//! use sammiewalk::{Difficulty, FavoritesStore, FilterCriteria, MemoryStore, Route, compute_view};
//!
//! let routes = vec![
//!     Route::new("a", "Veluwe Loop", Difficulty::Easy).with_distance(4.0),
//!     Route::new("b", "Alpine Ridge", Difficulty::Hard).with_distance(10.0),
//! ];
//!
//! let mut criteria = FilterCriteria::default();
//! criteria.minimum_distance_km = 5.0;
//! let view = compute_view(&routes, &criteria);
//! assert_eq!(view.len(), 1);
//!
//! let mut favorites = FavoritesStore::load(MemoryStore::new());
//! favorites.toggle("b");
//! assert!(favorites.is_member("b"));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, WalkError};

// Library configuration
pub mod config;
pub use config::WalkConfig;

// Key-value storage backends
pub mod storage;
#[cfg(feature = "persistence")]
pub use storage::SqliteStore;
pub use storage::{KeyValueStore, MemoryStore};

// Persistent favorite set
pub mod favorites;
pub use favorites::{FavoriteSet, FavoritesStore, FAVORITES_KEY};

// Route filter predicate and quick-filter presets
pub mod filter;
pub use filter::{matches, FilterCriteria, QuickFilter, RegionFilter};

// Route views composed for display
pub mod view;
pub use view::{
    active_filter_count, available_regions, compute_view, empty_view_message, featured_routes,
    quick_view, saved_routes, similar_routes,
};

// Waypoint node sequences
pub mod nodes;
pub use nodes::{format_nodes, parse_nodes};

// GPX track overview (bounds and map center)
pub mod track;
pub use track::{map_center, TrackOverview, DEFAULT_MAP_CENTER};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// How hard a route is to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Name as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    /// Dutch label shown on difficulty badges.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Makkelijk",
            Difficulty::Moderate => "Gemiddeld",
            Difficulty::Hard => "Moeilijk",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| WalkError::Parse {
                kind: "difficulty",
                value: s.to_string(),
            })
    }
}

/// Which guidance a route page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RouteType {
    #[serde(rename = "GPX")]
    Gpx,
    #[default]
    Nodes,
    Both,
}

/// A numbered waypoint of a node-network route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    /// The literal node number or label
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_start: Option<f64>,
}

impl RouteNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            distance_from_start: None,
        }
    }
}

/// A hiking-route listing as stored by the backend.
///
/// Treated as an immutable value once fetched. Optional fields carry explicit
/// defaults where the views need them: an absent distance counts as 0 km and
/// an absent region never matches a specific region filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Length in kilometers
    #[serde(default)]
    pub distance_km: Option<f64>,
    pub difficulty: Difficulty,
    /// Region tag used by the region filter
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub route_type: RouteType,
    /// Public URL of the GPX track
    #[serde(default)]
    pub gpx_file_url: Option<String>,
    #[serde(default)]
    pub nodes: Option<Vec<RouteNode>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cover_photo_url: Option<String>,
    #[serde(default)]
    pub start_point: Option<String>,
    #[serde(default)]
    pub sammiescore: Option<String>,
    #[serde(default)]
    pub guidance_type: Option<String>,
    #[serde(default)]
    pub guidance_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gallery_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Backend rows carry `null` for unset columns; read those as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Route {
    /// Create a route with only the required fields set, created now.
    pub fn new(id: impl Into<String>, title: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: String::new(),
            distance_km: None,
            difficulty,
            region: None,
            route_type: RouteType::default(),
            gpx_file_url: None,
            nodes: None,
            notes: None,
            cover_photo_url: None,
            start_point: None,
            sammiescore: None,
            guidance_type: None,
            guidance_text: None,
            gallery_urls: Vec::new(),
            tags: Vec::new(),
            duration: None,
            surface: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Distance used for filtering; absent counts as 0 km.
    pub fn effective_distance_km(&self) -> f64 {
        self.distance_km.unwrap_or(0.0)
    }

    /// Text offered when sharing a route page.
    pub fn share_text(&self) -> String {
        format!(
            "Ontdek deze wandeling: {} ({}km in {})",
            self.title,
            self.effective_distance_km(),
            self.location
        )
    }
}
