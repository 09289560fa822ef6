//! User-drawn exclusion polygons.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::LatLng;

/// Polygon the search should avoid, as an ordered ring of vertices.
///
/// The ring is implicitly closed; repeating the first vertex at the end is
/// allowed but not required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoGoZone {
    vertices: Vec<LatLng>,
}

impl NoGoZone {
    pub fn new(vertices: Vec<LatLng>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[LatLng] {
        &self.vertices
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(Error::InvalidZone {
                index,
                message: format!(
                    "polygon needs at least 3 vertices, got {}",
                    self.vertices.len()
                ),
            });
        }
        if self.vertices.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidZone {
                index,
                message: "vertices must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Ray-casting point-in-polygon test, casting along increasing longitude.
    pub fn contains(&self, point: LatLng) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.lat > point.lat) != (vj.lat > point.lat) {
                let crossing = (vj.lng - vi.lng) * (point.lat - vi.lat) / (vj.lat - vi.lat) + vi.lng;
                if point.lng < crossing {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// JSON shape accepted for zone files: a list of rings of `[lat, lng]` pairs.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ZoneFile(Vec<Vec<[f64; 2]>>);

/// Load and validate no-go zones from a JSON file.
pub fn load_zones(path: &Path) -> Result<Vec<NoGoZone>> {
    let file = fs::File::open(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    zones_from_reader(file)
}

/// Load and validate no-go zones from any reader.
pub fn zones_from_reader<R: Read>(reader: R) -> Result<Vec<NoGoZone>> {
    let ZoneFile(rings) = serde_json::from_reader(reader)?;
    let zones: Vec<NoGoZone> = rings
        .into_iter()
        .map(|ring| {
            NoGoZone::new(
                ring.into_iter()
                    .map(|[lat, lng]| LatLng::new(lat, lng))
                    .collect(),
            )
        })
        .collect();
    for (index, zone) in zones.iter().enumerate() {
        zone.validate(index)?;
    }
    Ok(zones)
}

/// Whether `point` falls inside any of the zones.
pub fn in_any_zone(zones: &[NoGoZone], point: LatLng) -> bool {
    zones.iter().any(|zone| zone.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> NoGoZone {
        NoGoZone::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 2.0),
            LatLng::new(2.0, 2.0),
            LatLng::new(2.0, 0.0),
        ])
    }

    #[test]
    fn point_inside_square() {
        assert!(square().contains(LatLng::new(1.0, 1.0)));
    }

    #[test]
    fn point_outside_square() {
        assert!(!square().contains(LatLng::new(3.0, 1.0)));
        assert!(!square().contains(LatLng::new(1.0, -0.5)));
    }

    #[test]
    fn concave_polygon_notch_is_outside() {
        // U shape opening to the north
        let zone = NoGoZone::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 3.0),
            LatLng::new(3.0, 3.0),
            LatLng::new(3.0, 2.0),
            LatLng::new(1.0, 2.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(3.0, 1.0),
            LatLng::new(3.0, 0.0),
        ]);
        assert!(!zone.contains(LatLng::new(2.0, 1.5)));
        assert!(zone.contains(LatLng::new(2.0, 0.5)));
        assert!(zone.contains(LatLng::new(0.5, 1.5)));
    }

    #[test]
    fn parses_rings_and_rejects_degenerate_zones() {
        let zones = zones_from_reader(r#"[[[0,0],[0,2],[2,2],[2,0]]]"#.as_bytes()).unwrap();
        assert_eq!(zones.len(), 1);
        assert!(in_any_zone(&zones, LatLng::new(1.0, 1.0)));

        let err = zones_from_reader(r#"[[[0,0],[0,2]]]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidZone { index: 0, .. }));
    }
}
