use super::{CatalogError, RoadSegment, SegmentId};
use geo::{LineString, MultiLineString};
use serde::{Deserialize, Serialize};
use wkt::TryFromWkt;

/// a row of a segment catalog file as written by the map extraction step.
///
/// the id comes from `segment_id`, or from the `u` and `v` node ids of the edge when
/// `segment_id` is absent. the length falls back to the haversine length of the geometry.
/// geometry is a WKT LINESTRING or MULTILINESTRING in lon/lat order.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CatalogRow {
    #[serde(default)]
    pub segment_id: Option<String>,
    #[serde(default)]
    pub u: Option<String>,
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "length")]
    pub length_m: Option<f64>,
    pub geometry: String,
    #[serde(default)]
    pub free_flow_kmh: Option<f64>,
}

impl CatalogRow {
    pub fn segment_id(&self, row: usize) -> Result<SegmentId, CatalogError> {
        match (&self.segment_id, &self.u, &self.v) {
            (Some(id), _, _) if !id.trim().is_empty() => Ok(SegmentId::new(id.trim())),
            (_, Some(u), Some(v)) => Ok(SegmentId::new(format!("{}_{}", u.trim(), v.trim()))),
            _ => Err(CatalogError::InvalidRow {
                row,
                message: String::from("missing 'segment_id' and no 'u'/'v' columns to derive one"),
            }),
        }
    }

    /// validates this row and converts it into a [`RoadSegment`].
    pub fn into_segment(self, row: usize) -> Result<RoadSegment, CatalogError> {
        let id = self.segment_id(row)?;
        let geometry = parse_geometry(&self.geometry)
            .map_err(|message| CatalogError::InvalidRow { row, message })?;
        match self.length_m {
            Some(length_m) => RoadSegment::new(id, self.name, length_m, geometry, self.free_flow_kmh),
            None => RoadSegment::from_geometry(id, self.name, geometry, self.free_flow_kmh),
        }
    }
}

/// parses a WKT LINESTRING, or a MULTILINESTRING whose parts are joined end to end
/// into a single line in the order they are listed.
fn parse_geometry(geometry: &str) -> Result<LineString<f64>, String> {
    let wkt_str = geometry.replace('\"', "");
    let wkt_str = wkt_str.trim();
    if wkt_str.to_ascii_uppercase().starts_with("MULTILINESTRING") {
        let multi = MultiLineString::<f64>::try_from_wkt_str(wkt_str).map_err(|e| {
            format!("unable to parse WKT MULTILINESTRING '{geometry}': {e}")
        })?;
        let coords = multi
            .0
            .into_iter()
            .flat_map(|line| line.0)
            .collect::<Vec<_>>();
        Ok(LineString::new(coords))
    } else {
        LineString::<f64>::try_from_wkt_str(wkt_str)
            .map_err(|e| format!("unable to parse WKT LINESTRING '{geometry}': {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_u_v() {
        let row = CatalogRow {
            u: Some(String::from("101")),
            v: Some(String::from("202")),
            geometry: String::from("LINESTRING (21.0 52.0, 21.001 52.001)"),
            ..Default::default()
        };
        let segment = row.into_segment(0).unwrap();
        assert_eq!(segment.id, SegmentId::from("101_202"));
        assert!(segment.length_m > 0.0);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let row = CatalogRow {
            geometry: String::from("LINESTRING (21.0 52.0, 21.001 52.001)"),
            ..Default::default()
        };
        assert!(matches!(
            row.into_segment(3),
            Err(CatalogError::InvalidRow { row: 3, .. })
        ));
    }

    #[test]
    fn test_invalid_wkt_is_an_error() {
        let row = CatalogRow {
            segment_id: Some(String::from("x")),
            length_m: Some(10.0),
            geometry: String::from("POINT (21.0 52.0)"),
            ..Default::default()
        };
        assert!(matches!(
            row.into_segment(0),
            Err(CatalogError::InvalidRow { .. })
        ));
    }

    #[test]
    fn test_multilinestring_parts_are_joined() {
        let row = CatalogRow {
            segment_id: Some(String::from("m")),
            geometry: String::from(
                "MULTILINESTRING ((21.0 52.0, 21.001 52.001), (21.001 52.001, 21.002 52.0015))",
            ),
            ..Default::default()
        };
        let segment = row.into_segment(0).unwrap();
        assert_eq!(
            segment.points(),
            vec![
                (52.0, 21.0),
                (52.001, 21.001),
                (52.001, 21.001),
                (52.0015, 21.002)
            ]
        );
        assert!(segment.length_m > 0.0);
    }
}
