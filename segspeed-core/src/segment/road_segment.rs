use super::{CatalogError, SegmentId};
use geo::{Haversine, Length, LineString};
use serde::{Deserialize, Serialize};

/// fallback label for segments that carry no street name.
pub const UNNAMED_ROAD: &str = "Unnamed Road";

/// a contiguous piece of road, the unit of traffic measurement and prediction.
///
/// geometry is stored with x=longitude, y=latitude, the ordering used by WKT.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoadSegment {
    pub id: SegmentId,
    /// street name. many segments of the same street share a name.
    pub name: Option<String>,
    pub length_m: f64,
    pub geometry: LineString<f64>,
    /// optional free-flow speed attribute, e.g. a posted speed limit.
    pub free_flow_kmh: Option<f64>,
}

impl RoadSegment {
    /// creates a segment, validating that the length is a positive real number and that
    /// the geometry has at least two points.
    pub fn new(
        id: SegmentId,
        name: Option<String>,
        length_m: f64,
        geometry: LineString<f64>,
        free_flow_kmh: Option<f64>,
    ) -> Result<RoadSegment, CatalogError> {
        if !length_m.is_finite() || length_m <= 0.0 {
            return Err(CatalogError::InvalidSegment(
                id,
                format!("length_m must be positive, found {length_m}"),
            ));
        }
        if geometry.0.len() < 2 {
            return Err(CatalogError::InvalidSegment(
                id,
                format!(
                    "geometry must have at least 2 points, found {}",
                    geometry.0.len()
                ),
            ));
        }
        Ok(RoadSegment {
            id,
            name: name.filter(|n| !n.trim().is_empty()),
            length_m,
            geometry,
            free_flow_kmh,
        })
    }

    /// builds a segment whose length is measured from its geometry.
    pub fn from_geometry(
        id: SegmentId,
        name: Option<String>,
        geometry: LineString<f64>,
        free_flow_kmh: Option<f64>,
    ) -> Result<RoadSegment, CatalogError> {
        let length_m = Haversine.length(&geometry);
        RoadSegment::new(id, name, length_m, geometry, free_flow_kmh)
    }

    /// the ordered (lat, lon) points of this segment.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.geometry.coords().map(|c| (c.y, c.x)).collect()
    }

    /// street name, or [`UNNAMED_ROAD`].
    pub fn road_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_ROAD)
    }

    /// label used for selection lists: "name (id)".
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.road_name(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    fn geometry() -> LineString<f64> {
        line_string![(x: 21.0122, y: 52.2297), (x: 21.0130, y: 52.2301)]
    }

    #[test]
    fn test_points_are_lat_lon() {
        let segment =
            RoadSegment::new(SegmentId::from("a"), None, 50.0, geometry(), None).unwrap();
        assert_eq!(
            segment.points(),
            vec![(52.2297, 21.0122), (52.2301, 21.0130)]
        );
    }

    #[test]
    fn test_rejects_non_positive_length() {
        let result = RoadSegment::new(SegmentId::from("a"), None, 0.0, geometry(), None);
        assert!(matches!(result, Err(CatalogError::InvalidSegment(_, _))));
        let result = RoadSegment::new(SegmentId::from("a"), None, f64::NAN, geometry(), None);
        assert!(matches!(result, Err(CatalogError::InvalidSegment(_, _))));
    }

    #[test]
    fn test_display_name() {
        let named = RoadSegment::new(
            SegmentId::from("12"),
            Some(String::from("Marszałkowska")),
            10.0,
            geometry(),
            None,
        )
        .unwrap();
        assert_eq!(named.display_name(), "Marszałkowska (12)");
        let unnamed = RoadSegment::new(
            SegmentId::from("13"),
            Some(String::from("  ")),
            10.0,
            geometry(),
            None,
        )
        .unwrap();
        assert_eq!(unnamed.display_name(), "Unnamed Road (13)");
    }

    #[test]
    fn test_length_from_geometry() {
        let segment =
            RoadSegment::from_geometry(SegmentId::from("a"), None, geometry(), None).unwrap();
        // ~70 meters between the two points
        assert!(segment.length_m > 50.0 && segment.length_m < 90.0);
    }
}
