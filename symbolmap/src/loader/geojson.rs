//! Decoding of land and border geometry from GeoJSON documents.

use geojson::{GeoJson, LineStringType, PolygonType, Position, Value};
use symbolmap_types::geo::{GeoPoint2d, NewGeoPoint};
use symbolmap_types::impls::{Contour, MultiContour, MultiPolygon, Polygon};
use symbolmap_types::Geom;

use crate::data::{BorderMesh, GeoFeature, LandCollection, TopologySnapshot};
use crate::error::SymbolmapError;

/// Decodes a GeoJSON document into a topology snapshot.
///
/// Polygon and multipolygon features become land features; line string and multi line string features are merged
/// into the border mesh. Other geometries are ignored. The feature `id`, if any, is stored as the `"id"` property.
pub fn decode_geojson(text: &str) -> Result<TopologySnapshot, SymbolmapError> {
    let geojson: GeoJson = text.parse()?;
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![geojson::Feature {
            geometry: Some(geometry),
            ..Default::default()
        }],
    };

    let mut land = vec![];
    let mut borders = vec![];

    for (index, feature) in features.into_iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            log::debug!("Feature {index} has no geometry");
            continue;
        };

        match &geometry.value {
            Value::Polygon(_) | Value::MultiPolygon(_) => {
                let Some(geom) = convert_areal(&geometry.value) else {
                    log::warn!("Feature {index} has invalid polygon geometry");
                    continue;
                };

                let mut properties = feature.properties.clone().unwrap_or_default();
                if let Some(id) = &feature.id {
                    let id = match id {
                        geojson::feature::Id::String(s) => serde_json::Value::from(s.as_str()),
                        geojson::feature::Id::Number(n) => serde_json::Value::from(n.clone()),
                    };
                    properties.entry("id").or_insert(id);
                }

                land.push(GeoFeature::new(geom, properties));
            }
            Value::LineString(line) => match convert_contour(line) {
                Some(contour) => borders.push(contour),
                None => log::warn!("Feature {index} has invalid line geometry"),
            },
            Value::MultiLineString(lines) => match convert_multi_contour(lines) {
                Some(contours) => borders.extend(contours.parts),
                None => log::warn!("Feature {index} has invalid line geometry"),
            },
            _ => log::debug!("Ignoring feature {index} with unsupported geometry type"),
        }
    }

    log::info!(
        "Decoded GeoJSON: {} land features, {} border lines",
        land.len(),
        borders.len()
    );

    Ok(TopologySnapshot::new(
        LandCollection::new(land),
        BorderMesh::new(MultiContour::from(borders)),
    ))
}

fn convert_areal(value: &Value) -> Option<Geom<GeoPoint2d>> {
    match value {
        Value::Polygon(polygon) => convert_polygon(polygon).map(Geom::Polygon),
        Value::MultiPolygon(mp) => convert_multi_polygon(mp).map(Geom::MultiPolygon),
        _ => None,
    }
}

fn convert_point(position: &Position) -> Option<GeoPoint2d> {
    match position.as_slice() {
        [lon, lat, ..] => Some(GeoPoint2d::lonlat(*lon, *lat)),
        _ => None,
    }
}

fn convert_contour(line_string: &LineStringType) -> Option<Contour<GeoPoint2d>> {
    let is_closed = line_string.len() > 1 && line_string.first() == line_string.last();
    let mut points = line_string
        .iter()
        .map(convert_point)
        .collect::<Option<Vec<_>>>()?;

    if is_closed {
        points.pop();
    }

    Some(Contour::new(points, is_closed))
}

fn convert_multi_contour(lines: &[LineStringType]) -> Option<MultiContour<GeoPoint2d>> {
    Some(MultiContour::from(
        lines
            .iter()
            .map(convert_contour)
            .collect::<Option<Vec<_>>>()?,
    ))
}

fn convert_polygon(polygon: &PolygonType) -> Option<Polygon<GeoPoint2d>> {
    let (outer, inner) = polygon.split_first()?;
    Some(Polygon::new(
        convert_contour(outer)?.into_closed()?,
        inner
            .iter()
            .map(|ring| convert_contour(ring).and_then(|c| c.into_closed()))
            .collect::<Option<Vec<_>>>()?,
    ))
}

fn convert_multi_polygon(mp: &[PolygonType]) -> Option<MultiPolygon<GeoPoint2d>> {
    Some(MultiPolygon::from(
        mp.iter().map(convert_polygon).collect::<Option<Vec<_>>>()?,
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use symbolmap_types::lonlat;

    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "ATL",
                "properties": {"name": "Atlantis"},
                "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 0]]]}
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": {"type": "LineString", "coordinates": [[5, 0], [5, 10]]}
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": {"type": "Point", "coordinates": [1, 1]}
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn splits_land_and_borders() {
        let snapshot = decode_geojson(COLLECTION).unwrap();

        assert_eq!(snapshot.land().len(), 1);
        let feature = &snapshot.land().features()[0];
        assert_eq!(feature.properties()["name"], "Atlantis");
        assert_eq!(feature.properties()["id"], "ATL");

        let Geom::Polygon(polygon) = feature.geometry() else {
            panic!("expected a polygon");
        };
        assert_eq!(
            polygon.outer_contour.points,
            vec![lonlat!(0.0, 0.0), lonlat!(10.0, 0.0), lonlat!(10.0, 10.0)]
        );

        let borders = snapshot.borders().geometry();
        assert_eq!(borders.parts().len(), 1);
        assert_eq!(borders.parts()[0].points(), &[lonlat!(5.0, 0.0), lonlat!(5.0, 10.0)]);
    }

    #[test]
    fn unclosed_ring_is_skipped() {
        let text = r#"{"type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10]]]}"#;
        let snapshot = decode_geojson(text).unwrap();
        assert!(snapshot.land().is_empty());
    }

    #[test]
    fn invalid_document() {
        assert_matches!(decode_geojson("{}"), Err(SymbolmapError::GeoJson(_)));
    }
}
