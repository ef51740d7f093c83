//! # Track Overview
//!
//! Read a route's GPX document into the points, bounds and center the route
//! map is framed with. Parsing is done by the `gpx` crate; bounds come from
//! `geo`.

use std::io::Read;

use geo::{BoundingRect, Coord, LineString};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WalkError};
use crate::{Bounds, GpsPoint};

/// Map center used when a route has no usable track (Antwerp).
pub const DEFAULT_MAP_CENTER: GpsPoint = GpsPoint {
    latitude: 51.2194,
    longitude: 4.4025,
};

/// Points of a GPX track with precomputed bounds and center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackOverview {
    /// Name of the first track or route, if any
    pub name: Option<String>,
    pub points: Vec<GpsPoint>,
    pub bounds: Bounds,
    pub center: GpsPoint,
}

impl TrackOverview {
    /// Parse a GPX document.
    ///
    /// `points` is the line drawn on the map: track points when present, then
    /// route points, then waypoints. `bounds` frames every point in the
    /// document, so off-track waypoints stay in view. Points with out-of-range
    /// coordinates are skipped.
    pub fn from_gpx<R: Read>(reader: R) -> Result<Self> {
        let data = ::gpx::read(reader).map_err(|e| WalkError::Gpx {
            message: e.to_string(),
        })?;

        let name = data
            .tracks
            .iter()
            .find_map(|t| t.name.clone())
            .or_else(|| data.routes.iter().find_map(|r| r.name.clone()));

        let track_points = to_gps_points(
            data.tracks
                .iter()
                .flat_map(|t| t.segments.iter())
                .flat_map(|s| s.points.iter()),
        );
        let route_points = to_gps_points(data.routes.iter().flat_map(|r| r.points.iter()));
        let waypoints = to_gps_points(data.waypoints.iter());

        let bounds = bounds_of(
            track_points
                .iter()
                .chain(route_points.iter())
                .chain(waypoints.iter()),
        )
        .ok_or(WalkError::EmptyTrack)?;

        let points = [track_points, route_points, waypoints]
            .into_iter()
            .find(|p| !p.is_empty())
            .unwrap_or_default();

        debug!(
            "[Track] {} points, bounds lat {:.4}..{:.4} lng {:.4}..{:.4}",
            points.len(),
            bounds.min_lat,
            bounds.max_lat,
            bounds.min_lng,
            bounds.max_lng
        );

        Ok(Self {
            name,
            center: bounds.center(),
            points,
            bounds,
        })
    }

    /// Parse a GPX document held in a string.
    pub fn from_gpx_str(text: &str) -> Result<Self> {
        Self::from_gpx(text.trim_start().as_bytes())
    }
}

fn to_gps_points<'a, I>(waypoints: I) -> Vec<GpsPoint>
where
    I: Iterator<Item = &'a ::gpx::Waypoint>,
{
    waypoints
        .map(|w| {
            let p = w.point();
            GpsPoint::new(p.y(), p.x())
        })
        .filter(GpsPoint::is_valid)
        .collect()
}

fn bounds_of<'a, I>(points: I) -> Option<Bounds>
where
    I: Iterator<Item = &'a GpsPoint>,
{
    let line: LineString = points
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();
    let rect = line.bounding_rect()?;
    Some(Bounds {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lng: rect.min().x,
        max_lng: rect.max().x,
    })
}

/// Map center for an optional track, falling back to [`DEFAULT_MAP_CENTER`].
pub fn map_center(track: Option<&TrackOverview>) -> GpsPoint {
    track.map_or(DEFAULT_MAP_CENTER, |t| t.center)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VELUWE_GPX: &str = r#"
<?xml version="1.0" encoding="UTF-8"?>
<gpx xmlns="http://www.topografix.com/GPX/1/1" version="1.1" creator="SammieWalk">
  <trk>
    <name>Veluwe Loop</name>
    <trkseg>
      <trkpt lat="52.0298" lon="5.9863"></trkpt>
      <trkpt lat="52.0310" lon="5.9890"></trkpt>
      <trkpt lat="52.0325" lon="5.9920"></trkpt>
      <trkpt lat="52.0350" lon="5.9940"></trkpt>
      <trkpt lat="52.0380" lon="5.9910"></trkpt>
      <trkpt lat="52.0360" lon="5.9850"></trkpt>
      <trkpt lat="52.0320" lon="5.9820"></trkpt>
      <trkpt lat="52.0298" lon="5.9863"></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

    #[test]
    fn test_track_bounds_and_center() {
        let track = TrackOverview::from_gpx_str(VELUWE_GPX).unwrap();
        assert_eq!(track.name.as_deref(), Some("Veluwe Loop"));
        assert_eq!(track.points.len(), 8);
        assert!((track.bounds.min_lat - 52.0298).abs() < 1e-9);
        assert!((track.bounds.max_lat - 52.0380).abs() < 1e-9);
        assert!((track.bounds.min_lng - 5.9820).abs() < 1e-9);
        assert!((track.bounds.max_lng - 5.9940).abs() < 1e-9);
        assert!((track.center.latitude - 52.0339).abs() < 1e-9);
        assert!((track.center.longitude - 5.9880).abs() < 1e-9);
        assert_eq!(map_center(Some(&track)), track.center);
    }

    #[test]
    fn test_route_points_fallback() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <rte>
    <name>Node walk</name>
    <rtept lat="51.0" lon="4.0"></rtept>
    <rtept lat="51.5" lon="4.5"></rtept>
  </rte>
</gpx>"#;
        let track = TrackOverview::from_gpx_str(gpx).unwrap();
        assert_eq!(track.name.as_deref(), Some("Node walk"));
        assert_eq!(track.center, GpsPoint::new(51.25, 4.25));
    }

    #[test]
    fn test_bounds_include_off_track_waypoints() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <wpt lat="52.10" lon="6.10"><name>Parking</name></wpt>
  <trk><trkseg>
    <trkpt lat="52.00" lon="6.00"></trkpt>
    <trkpt lat="52.02" lon="6.02"></trkpt>
  </trkseg></trk>
</gpx>"#;
        let track = TrackOverview::from_gpx_str(gpx).unwrap();
        // The drawn line is the track only
        assert_eq!(track.points.len(), 2);
        assert!((track.bounds.max_lat - 52.10).abs() < 1e-9);
        assert!((track.bounds.max_lng - 6.10).abs() < 1e-9);
        assert!((track.bounds.min_lat - 52.00).abs() < 1e-9);
        assert!((track.center.latitude - 52.05).abs() < 1e-9);
    }

    #[test]
    fn test_empty_document() {
        let gpx = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test"></gpx>"#;
        assert!(matches!(
            TrackOverview::from_gpx_str(gpx),
            Err(WalkError::EmptyTrack)
        ));
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            TrackOverview::from_gpx_str("this is not xml"),
            Err(WalkError::Gpx { .. })
        ));
    }

    #[test]
    fn test_default_center() {
        assert_eq!(map_center(None), DEFAULT_MAP_CENTER);
    }
}
