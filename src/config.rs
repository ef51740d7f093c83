//! Library configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkError};
use crate::favorites::FAVORITES_KEY;

/// Tunables for favorites storage and the route views.
///
/// Missing fields fall back to their defaults when deserialized, so a partial
/// JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Key under which favorites are persisted.
    /// Default: "sammiewalk_favorites"
    pub favorites_key: String,

    /// Routes strictly shorter than this are "short" walks.
    /// Default: 5.0 km
    pub short_max_km: f64,

    /// Routes at least this long are "long" walks.
    /// Default: 10.0 km
    pub long_min_km: f64,

    /// Number of newest routes shown as featured.
    /// Default: 3
    pub featured_count: usize,

    /// Maximum number of similar routes suggested on a route page.
    /// Default: 4
    pub similar_limit: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            favorites_key: FAVORITES_KEY.to_string(),
            short_max_km: 5.0,
            long_min_km: 10.0,
            featured_count: 3,
            similar_limit: 4,
        }
    }
}

impl WalkConfig {
    /// Parse a configuration from JSON and check it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WalkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the views cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.favorites_key.trim().is_empty() {
            return Err(WalkError::Config {
                message: "favorites_key must not be empty".to_string(),
            });
        }
        if !(self.short_max_km.is_finite() && self.long_min_km.is_finite()) {
            return Err(WalkError::Config {
                message: "distance thresholds must be finite".to_string(),
            });
        }
        if self.short_max_km < 0.0 || self.long_min_km < 0.0 {
            return Err(WalkError::Config {
                message: format!(
                    "distance thresholds must be non-negative (short < {}, long >= {})",
                    self.short_max_km, self.long_min_km
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WalkConfig::default();
        assert_eq!(config.favorites_key, "sammiewalk_favorites");
        assert_eq!(config.short_max_km, 5.0);
        assert_eq!(config.long_min_km, 10.0);
        assert_eq!(config.featured_count, 3);
        assert_eq!(config.similar_limit, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = WalkConfig::from_json(r#"{"featured_count": 6}"#).unwrap();
        assert_eq!(config.featured_count, 6);
        assert_eq!(config.similar_limit, 4);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            WalkConfig::from_json(r#"{"favorites_key": "  "}"#),
            Err(WalkError::Config { .. })
        ));
        assert!(matches!(
            WalkConfig::from_json(r#"{"short_max_km": -1.0}"#),
            Err(WalkError::Config { .. })
        ));
        assert!(matches!(
            WalkConfig::from_json("not json"),
            Err(WalkError::Serialization(_))
        ));
    }
}
