//! Decoding of land and border geometry from TopoJSON topologies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use symbolmap_types::geo::{GeoPoint2d, NewGeoPoint};
use symbolmap_types::impls::{ClosedContour, Contour, MultiContour, MultiPolygon, Polygon};
use symbolmap_types::Geom;

use crate::data::{BorderMesh, GeoFeature, LandCollection, TopologySnapshot};
use crate::error::SymbolmapError;

/// Which arcs of the countries object make up the border mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderFilter {
    /// Only arcs shared by two different geometries, i.e. borders between countries. Coastlines are excluded.
    #[default]
    Interior,
    /// Every arc referenced by the object.
    All,
}

/// Names of the topology objects to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyObjects {
    /// Object with the land polygons. If the topology has no such object, the countries object is used instead.
    pub land: String,
    /// Object with the country polygons the border mesh is built from.
    pub countries: String,
    /// Arcs included into the border mesh.
    pub borders: BorderFilter,
}

impl Default for TopologyObjects {
    fn default() -> Self {
        Self {
            land: "land".to_string(),
            countries: "countries".to_string(),
            borders: BorderFilter::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: BTreeMap<String, TopoGeometry>,
}

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(from = "RawGeometry")]
struct TopoGeometry {
    shape: Shape,
    id: Option<Value>,
    properties: Option<Map<String, Value>>,
}

// Geometry object as written in the document. The `type` member may be `null` for a geometry without a shape.
#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    arcs: Value,
    #[serde(default)]
    geometries: Vec<TopoGeometry>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug)]
enum Shape {
    GeometryCollection { geometries: Vec<TopoGeometry> },
    Polygon { arcs: Vec<Vec<i64>> },
    MultiPolygon { arcs: Vec<Vec<Vec<i64>>> },
    LineString { arcs: Vec<i64> },
    MultiLineString { arcs: Vec<Vec<i64>> },
    Empty,
}

impl From<RawGeometry> for TopoGeometry {
    fn from(raw: RawGeometry) -> Self {
        let arcs = raw.arcs;
        let shape = match raw.kind.as_deref() {
            Some("GeometryCollection") => Ok(Shape::GeometryCollection {
                geometries: raw.geometries,
            }),
            Some("Polygon") => serde_json::from_value(arcs).map(|arcs| Shape::Polygon { arcs }),
            Some("MultiPolygon") => serde_json::from_value(arcs).map(|arcs| Shape::MultiPolygon { arcs }),
            Some("LineString") => serde_json::from_value(arcs).map(|arcs| Shape::LineString { arcs }),
            Some("MultiLineString") => serde_json::from_value(arcs).map(|arcs| Shape::MultiLineString { arcs }),
            _ => Ok(Shape::Empty),
        };

        let shape = shape.unwrap_or_else(|err| {
            log::warn!("Ignoring {:?} geometry with malformed arcs: {err}", raw.kind);
            Shape::Empty
        });

        Self {
            shape,
            id: raw.id,
            properties: raw.properties,
        }
    }
}

impl TopoGeometry {
    // Non-collection geometries in document order.
    fn leaves(&self) -> Vec<&TopoGeometry> {
        let mut leaves = vec![];
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a TopoGeometry>) {
        match &self.shape {
            Shape::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.collect_leaves(leaves);
                }
            }
            _ => leaves.push(self),
        }
    }

    fn arc_indices(&self) -> Vec<i64> {
        match &self.shape {
            Shape::Polygon { arcs } | Shape::MultiLineString { arcs } => arcs.iter().flatten().copied().collect(),
            Shape::MultiPolygon { arcs } => arcs.iter().flatten().flatten().copied().collect(),
            Shape::LineString { arcs } => arcs.clone(),
            Shape::GeometryCollection { .. } | Shape::Empty => vec![],
        }
    }
}

/// Decodes a TopoJSON document into a topology snapshot.
///
/// Every polygon or multipolygon geometry of the land object becomes one land feature, keeping its properties (and
/// its `id` as the `"id"` property). The border mesh is built from the arcs of the countries object according to
/// [`TopologyObjects::borders`]; each arc is included at most once. If the topology has no countries object, the
/// mesh is empty.
///
/// Geometries that reference missing arcs are skipped with a warning, as are arc references in the countries object
/// that do not resolve; the rest of the topology is still decoded.
pub fn decode_topojson(text: &str, objects: &TopologyObjects) -> Result<TopologySnapshot, SymbolmapError> {
    let topology: Topology = serde_json::from_str(text)?;
    if topology.kind != "Topology" {
        return Err(SymbolmapError::Decoding(format!(
            "expected a Topology, got {}",
            topology.kind
        )));
    }

    let arcs = ArcSet::decode(&topology)?;

    let land_object = match topology.objects.get(&objects.land) {
        Some(object) => object,
        None => {
            log::debug!(
                "Topology has no '{}' object, using '{}' as land",
                objects.land,
                objects.countries
            );
            topology.objects.get(&objects.countries).ok_or_else(|| {
                SymbolmapError::Decoding(format!(
                    "topology has neither '{}' nor '{}' object",
                    objects.land, objects.countries
                ))
            })?
        }
    };

    let mut features = vec![];
    for geometry in land_object.leaves() {
        let geom = match arcs.areal_geometry(geometry) {
            Ok(Some(geom)) => geom,
            Ok(None) => {
                log::debug!("Skipping non-areal geometry in the land object");
                continue;
            }
            Err(err) => {
                log::warn!("Skipping land geometry {:?}: {err}", geometry.id);
                continue;
            }
        };

        let mut properties = geometry.properties.clone().unwrap_or_default();
        if let Some(id) = &geometry.id {
            properties.entry("id").or_insert_with(|| id.clone());
        }

        features.push(GeoFeature::new(geom, properties));
    }

    let borders = match topology.objects.get(&objects.countries) {
        Some(countries) => arcs.mesh(countries, objects.borders),
        None => {
            log::warn!(
                "Topology has no '{}' object, border mesh is empty",
                objects.countries
            );
            MultiContour::default()
        }
    };

    log::info!(
        "Decoded topology: {} land features, {} border lines",
        features.len(),
        borders.parts().len()
    );

    Ok(TopologySnapshot::new(
        LandCollection::new(features),
        BorderMesh::new(borders),
    ))
}

struct ArcSet {
    arcs: Vec<Vec<GeoPoint2d>>,
}

impl ArcSet {
    fn decode(topology: &Topology) -> Result<Self, SymbolmapError> {
        let mut arcs = Vec::with_capacity(topology.arcs.len());

        for arc in &topology.arcs {
            let mut points = Vec::with_capacity(arc.len());
            let (mut x, mut y) = (0.0, 0.0);

            for position in arc {
                let [px, py, ..] = position.as_slice() else {
                    return Err(SymbolmapError::Decoding(
                        "arc position must have at least two coordinates".into(),
                    ));
                };

                let point = match &topology.transform {
                    Some(transform) => {
                        x += *px;
                        y += *py;
                        GeoPoint2d::lonlat(
                            x * transform.scale[0] + transform.translate[0],
                            y * transform.scale[1] + transform.translate[1],
                        )
                    }
                    None => GeoPoint2d::lonlat(*px, *py),
                };
                points.push(point);
            }

            arcs.push(points);
        }

        Ok(Self { arcs })
    }

    fn arc(&self, index: i64) -> Result<(&[GeoPoint2d], bool), SymbolmapError> {
        let (position, reversed) = if index < 0 {
            (!index, true)
        } else {
            (index, false)
        };

        usize::try_from(position)
            .ok()
            .and_then(|position| self.arcs.get(position))
            .map(|arc| (arc.as_slice(), reversed))
            .ok_or_else(|| SymbolmapError::Decoding(format!("arc index {index} is out of range")))
    }

    // Concatenates arcs into one line. The first point of every next arc repeats the last point of the previous one.
    fn line(&self, indices: &[i64]) -> Result<Vec<GeoPoint2d>, SymbolmapError> {
        let mut points: Vec<GeoPoint2d> = vec![];
        for &index in indices {
            let (arc, reversed) = self.arc(index)?;
            let skip = usize::from(!points.is_empty());
            if reversed {
                points.extend(arc.iter().rev().skip(skip));
            } else {
                points.extend(arc.iter().skip(skip));
            }
        }

        Ok(points)
    }

    fn ring(&self, indices: &[i64]) -> Result<ClosedContour<GeoPoint2d>, SymbolmapError> {
        let mut points = self.line(indices)?;
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        Ok(ClosedContour::new(points))
    }

    fn polygon(&self, rings: &[Vec<i64>]) -> Result<Option<Polygon<GeoPoint2d>>, SymbolmapError> {
        let Some((outer, inner)) = rings.split_first() else {
            return Ok(None);
        };

        let inner = inner
            .iter()
            .map(|ring| self.ring(ring))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Polygon::new(self.ring(outer)?, inner)))
    }

    fn areal_geometry(&self, geometry: &TopoGeometry) -> Result<Option<Geom<GeoPoint2d>>, SymbolmapError> {
        Ok(match &geometry.shape {
            Shape::Polygon { arcs } => self.polygon(arcs)?.map(Geom::Polygon),
            Shape::MultiPolygon { arcs } => {
                let mut parts = Vec::with_capacity(arcs.len());
                for polygon in arcs {
                    if let Some(polygon) = self.polygon(polygon)? {
                        parts.push(polygon);
                    }
                }
                Some(Geom::MultiPolygon(MultiPolygon::from(parts)))
            }
            _ => None,
        })
    }

    fn mesh(&self, object: &TopoGeometry, filter: BorderFilter) -> MultiContour<GeoPoint2d> {
        // arc position -> (first geometry, last geometry) referencing it
        let mut owners: BTreeMap<usize, (usize, usize)> = BTreeMap::new();

        for (geometry_index, geometry) in object.leaves().into_iter().enumerate() {
            for index in geometry.arc_indices() {
                let position = if index < 0 { !index } else { index };
                let Some(position) = usize::try_from(position).ok().filter(|p| *p < self.arcs.len()) else {
                    log::warn!("Ignoring arc index {index} out of range in the border mesh");
                    continue;
                };

                owners
                    .entry(position)
                    .and_modify(|(_, last)| *last = geometry_index)
                    .or_insert((geometry_index, geometry_index));
            }
        }

        let mut parts = vec![];
        for (position, (first, last)) in owners {
            if filter == BorderFilter::Interior && first == last {
                continue;
            }

            match self.arcs.get(position) {
                Some(points) if points.len() >= 2 => parts.push(Contour::open(points.clone())),
                _ => {}
            }
        }

        MultiContour::from(parts)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use symbolmap_types::geo::GeoPoint;
    use symbolmap_types::lonlat;

    use super::*;

    // Two squares side by side sharing the edge x = 10 (arc 1), with a quantization transform.
    //
    //  arc 0: (10,0) -> (0,0) -> (0,10) -> (10,10)   left square outline
    //  arc 1: (10,10) -> (10,0)                       shared edge
    //  arc 2: (10,10) -> (20,10) -> (20,0) -> (10,0)  right square outline
    const TWO_SQUARES: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [0.5, 0.5], "translate": [-10.0, 0.0]},
        "objects": {
            "countries": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "A", "arcs": [[0, 1]], "properties": {"name": "Left"}},
                    {"type": "Polygon", "id": "B", "arcs": [[2, -2]]}
                ]
            },
            "land": {
                "type": "GeometryCollection",
                "geometries": [{"type": "MultiPolygon", "arcs": [[[0, 1]], [[2, -2]]]}]
            }
        },
        "arcs": [
            [[40, 0], [-20, 0], [0, 20], [20, 0]],
            [[40, 20], [0, -20]],
            [[40, 20], [20, 0], [0, -20], [-20, 0]]
        ]
    }"#;

    #[test]
    fn decodes_land() {
        let snapshot = decode_topojson(TWO_SQUARES, &TopologyObjects::default()).unwrap();
        let land = snapshot.land();
        assert_eq!(land.len(), 1);

        let Geom::MultiPolygon(multi_polygon) = land.features()[0].geometry() else {
            panic!("expected a multipolygon");
        };
        assert_eq!(multi_polygon.parts().len(), 2);

        let left = &multi_polygon.parts()[0].outer_contour.points;
        assert_eq!(
            left,
            &vec![
                lonlat!(10.0, 0.0),
                lonlat!(0.0, 0.0),
                lonlat!(0.0, 10.0),
                lonlat!(10.0, 10.0),
            ]
        );

        // reversed shared arc closes the right square
        let right = &multi_polygon.parts()[1].outer_contour.points;
        assert_eq!(right.len(), 4);
        assert_eq!(right[0], lonlat!(10.0, 10.0));
        assert_eq!(right[3], lonlat!(10.0, 0.0));
    }

    #[test]
    fn mesh_contains_only_shared_arcs() {
        let snapshot = decode_topojson(TWO_SQUARES, &TopologyObjects::default()).unwrap();
        let mesh = snapshot.borders().geometry();
        assert_eq!(mesh.parts().len(), 1);
        assert_eq!(
            mesh.parts()[0].points(),
            &[lonlat!(10.0, 10.0), lonlat!(10.0, 0.0)]
        );

        let objects = TopologyObjects {
            borders: BorderFilter::All,
            ..TopologyObjects::default()
        };
        let snapshot = decode_topojson(TWO_SQUARES, &objects).unwrap();
        assert_eq!(snapshot.borders().geometry().parts().len(), 3);
    }

    #[test]
    fn falls_back_to_countries_for_land() {
        let objects = TopologyObjects {
            land: "continents".to_string(),
            ..TopologyObjects::default()
        };
        let snapshot = decode_topojson(TWO_SQUARES, &objects).unwrap();
        let land = snapshot.land();
        assert_eq!(land.len(), 2);
        assert_eq!(land.features()[0].properties()["name"], "Left");
        assert_eq!(land.features()[0].properties()["id"], "A");
        assert_eq!(land.features()[1].properties()["id"], "B");
    }

    #[test]
    fn unquantized_arcs() {
        let text = r#"{
            "type": "Topology",
            "objects": {"land": {"type": "Polygon", "arcs": [[0]]}},
            "arcs": [[[-5.5, 1.0], [5.5, 1.0], [0.0, 8.0], [-5.5, 1.0]]]
        }"#;
        let snapshot = decode_topojson(text, &TopologyObjects::default()).unwrap();
        let Geom::Polygon(polygon) = snapshot.land().features()[0].geometry() else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.outer_contour.points.len(), 3);
        assert_eq!(polygon.outer_contour.points[2].lat(), 8.0);
        assert!(snapshot.borders().geometry().parts().is_empty());
    }

    #[test]
    fn invalid_documents() {
        assert_matches!(
            decode_topojson(r#"{"type": "FeatureCollection", "features": []}"#, &TopologyObjects::default()),
            Err(SymbolmapError::Json(_))
        );
        assert_matches!(
            decode_topojson(r#"{"type": "Tpology", "arcs": [], "objects": {}}"#, &TopologyObjects::default()),
            Err(SymbolmapError::Decoding(_))
        );
        assert_matches!(
            decode_topojson(r#"{"type": "Topology", "arcs": [], "objects": {}}"#, &TopologyObjects::default()),
            Err(SymbolmapError::Decoding(_))
        );
    }

    #[test]
    fn geometry_with_missing_arcs_is_skipped() {
        let text = r#"{
            "type": "Topology",
            "objects": {
                "countries": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Polygon", "id": "A", "arcs": [[0]]},
                        {"type": "Polygon", "id": "B", "arcs": [[99]]},
                        {"type": "MultiPolygon", "id": "C", "arcs": [[[0]], [[-100]]]}
                    ]
                }
            },
            "arcs": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]]]
        }"#;

        let snapshot = decode_topojson(text, &TopologyObjects::default()).unwrap();
        assert_eq!(snapshot.land().len(), 1);
        assert_eq!(snapshot.land().features()[0].properties()["id"], "A");

        // arc 0 is referenced by A and C, broken references are ignored
        let mesh = snapshot.borders().geometry();
        assert_eq!(mesh.parts().len(), 1);
        assert_eq!(mesh.parts()[0].points().len(), 4);
    }

    #[test]
    fn null_geometry_type_is_tolerated() {
        let text = r#"{
            "type": "Topology",
            "objects": {
                "countries": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": null, "id": "Nowhere"},
                        {"type": "Polygon", "id": "A", "arcs": [[0]]},
                        {"type": "Polygon", "id": "Broken", "arcs": "not arcs"},
                        {"type": "Point", "coordinates": [1, 2]}
                    ]
                }
            },
            "arcs": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]]]
        }"#;

        let snapshot = decode_topojson(text, &TopologyObjects::default()).unwrap();
        assert_eq!(snapshot.land().len(), 1);
        assert_eq!(snapshot.land().features()[0].properties()["id"], "A");
    }
}
