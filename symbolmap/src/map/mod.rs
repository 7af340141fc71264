//! [`Map`] composes the layers into a single render pass.

use serde::{Deserialize, Serialize};
use symbolmap_types::cartesian::{Point2d, Size};
use symbolmap_types::geo::GeoPoint2d;

use crate::data::{IncidentSnapshot, TopologySnapshot};
use crate::error::SymbolmapError;
use crate::graticule::Graticule;
use crate::layer::{BackgroundLayer, BorderLayer, LandLayer, Layer, RenderContext, SymbolLayer};
use crate::projector::{GeoProjector, ProjectionKind};
use crate::render::Frame;
use crate::scale::{RadiusScale, DEFAULT_MAX_RADIUS};

mod builder;
mod data;

pub use builder::MapBuilder;
pub use data::MapData;

/// Configuration of a [`Map`].
///
/// All fields are optional when deserializing; missing ones take the default values.
///
/// ```
/// use symbolmap::MapOptions;
///
/// let options: MapOptions = serde_json::from_str(r#"{"size": {"width": 800.0, "height": 400.0}, "clamp": true}"#).unwrap();
/// assert_eq!(options.size.width(), 800.0);
/// assert_eq!(options.max_radius, 15.0);
/// assert!(options.clamp);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Viewport size in pixels. Defaults to 960x500.
    pub size: Size,
    /// Space in pixels left empty on every side of the sphere when the scale is fitted.
    pub padding: f64,
    /// Geographic point placed in the middle of the viewport.
    pub center: GeoPoint2d,
    /// Projection family.
    pub projection: ProjectionKind,
    /// Explicit projection scale. If not set, the scale is fitted to the viewport.
    pub scale: Option<f64>,
    /// Radius in pixels of the largest symbol.
    pub max_radius: f64,
    /// Whether radii of values above the domain maximum are clamped.
    pub clamp: bool,
    /// Graticule drawn in the background. `None` disables the graticule.
    pub graticule: Option<Graticule>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            size: Size::new(960.0, 500.0),
            padding: 0.0,
            center: GeoPoint2d::default(),
            projection: ProjectionKind::default(),
            scale: None,
            max_radius: DEFAULT_MAX_RADIUS,
            clamp: false,
            graticule: Some(Graticule::default()),
        }
    }
}

impl MapOptions {
    /// Creates the projector described by the options.
    pub fn projector(&self) -> GeoProjector {
        match self.scale {
            Some(scale) => GeoProjector::new(
                self.projection,
                self.center,
                scale,
                Point2d::new(self.size.half_width(), self.size.half_height()),
            ),
            None => GeoProjector::fit(self.projection, self.center, self.size, self.padding),
        }
    }
}

/// Proportional symbol world map.
///
/// A map owns its configuration and the projector derived from it. Rendering takes the topology and incident snapshots
/// and produces a [`Frame`] with the operations of all layers in drawing order: background, land, borders and symbols.
/// The radius scale is derived from the incident snapshot on every call.
#[derive(Debug, Clone)]
pub struct Map {
    options: MapOptions,
    projector: GeoProjector,
    background: BackgroundLayer,
}

impl Map {
    /// Creates a new map.
    pub fn new(options: MapOptions) -> Self {
        let projector = options.projector();
        let background = BackgroundLayer::new(options.graticule);
        Self {
            options,
            projector,
            background,
        }
    }

    /// Options of the map.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Projector shared by all layers.
    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    /// Radius scale for the given incidents.
    pub fn radius_scale(&self, incidents: &IncidentSnapshot) -> RadiusScale {
        RadiusScale::from_snapshot(incidents, self.options.max_radius).with_clamp(self.options.clamp)
    }

    /// Renders the snapshots into a frame.
    pub fn render(&self, topology: &TopologySnapshot, incidents: &IncidentSnapshot) -> Frame {
        let context = RenderContext::new(&self.projector, self.radius_scale(incidents));

        let mut ops = self.background.render(&(), &context);
        ops.extend(LandLayer.render(topology.land().features(), &context));
        ops.extend(BorderLayer.render(topology.borders(), &context));
        ops.extend(SymbolLayer.render(incidents.records(), &context));

        log::debug!(
            "Rendered {} draw operations for {} land features and {} incidents",
            ops.len(),
            topology.land().len(),
            incidents.len()
        );

        Frame::new(self.options.size, ops)
    }

    /// Renders the map data, or returns [`SymbolmapError::MissingData`] if a snapshot is not loaded yet.
    pub fn render_data(&self, data: &MapData) -> Result<Frame, SymbolmapError> {
        let (topology, incidents) = data.snapshots()?;
        Ok(self.render(topology, incidents))
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use serde_json::Map as JsonMap;
    use symbolmap_types::cartesian::CartesianPoint2d;
    use symbolmap_types::impls::{Contour, MultiContour, Polygon};
    use symbolmap_types::{lonlat, Geom};

    use super::*;
    use crate::data::{BorderMesh, GeoFeature, IncidentId, IncidentRecord, LandCollection};
    use crate::error::MissingSnapshot;
    use crate::render::{LayerKind, Primitive};

    fn topology() -> TopologySnapshot {
        let land = LandCollection::new(vec![
            GeoFeature::new(
                Geom::Polygon(Polygon::from(vec![
                    lonlat!(-110.0, 15.0),
                    lonlat!(-90.0, 15.0),
                    lonlat!(-90.0, 30.0),
                ])),
                JsonMap::new(),
            ),
            GeoFeature::new(
                Geom::Polygon(Polygon::from(vec![
                    lonlat!(10.0, 40.0),
                    lonlat!(20.0, 40.0),
                    lonlat!(20.0, 50.0),
                ])),
                JsonMap::new(),
            ),
        ]);
        let borders = BorderMesh::new(MultiContour::from(vec![Contour::open(vec![
            lonlat!(-100.0, 15.0),
            lonlat!(-100.0, 30.0),
        ])]));

        TopologySnapshot::new(land, borders)
    }

    fn incidents() -> IncidentSnapshot {
        IncidentSnapshot::new(vec![
            IncidentRecord::new(IncidentId::Name("a".into()), -99.13, 19.43, 25.0).unwrap(),
            IncidentRecord::new(IncidentId::Name("b".into()), 15.0, 45.0, 100.0).unwrap(),
        ])
    }

    #[test]
    fn layers_are_drawn_in_order() {
        let frame = Map::default().render(&topology(), &incidents());
        let layers: Vec<LayerKind> = frame.ops().iter().map(|op| op.layer).collect();
        assert_eq!(
            layers,
            vec![
                LayerKind::Background,
                LayerKind::Background,
                LayerKind::Land,
                LayerKind::Land,
                LayerKind::Borders,
                LayerKind::Symbols,
                LayerKind::Symbols,
            ]
        );

        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
    }

    #[test]
    fn symbols_use_shared_projector_and_scale() {
        let frame = Map::default().render(&topology(), &incidents());
        let symbols: Vec<_> = frame.layer_ops(LayerKind::Symbols).collect();

        let Primitive::Circle(first) = symbols[0].primitive else {
            panic!("expected a circle");
        };
        assert_abs_diff_eq!(first.center.x(), 220.3167, epsilon = 1e-3);
        assert_abs_diff_eq!(first.center.y(), 189.9628, epsilon = 1e-3);
        assert_abs_diff_eq!(first.radius, 7.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_incidents_give_no_symbols() {
        let frame = Map::default().render(&topology(), &IncidentSnapshot::default());
        assert_eq!(frame.layer_ops(LayerKind::Symbols).count(), 0);
        assert_eq!(frame.layer_ops(LayerKind::Land).count(), 2);
    }

    #[test]
    fn rendering_is_stable() {
        let map = Map::default();
        assert_eq!(
            map.render(&topology(), &incidents()),
            map.render(&topology(), &incidents())
        );
    }

    #[test]
    fn render_data_requires_snapshots() {
        let map = Map::default();
        assert_matches!(
            map.render_data(&MapData::default()),
            Err(SymbolmapError::MissingData(MissingSnapshot::Both))
        );

        let data = MapData::new(topology(), incidents());
        assert_eq!(
            map.render_data(&data).unwrap(),
            map.render(&topology(), &incidents())
        );
    }

    #[test]
    fn explicit_scale() {
        let options = MapOptions {
            scale: Some(100.0),
            ..MapOptions::default()
        };
        assert_eq!(options.projector().scale(), 100.0);
        assert_eq!(options.projector().translate(), Point2d::new(480.0, 250.0));
    }

    #[test]
    fn options_from_json() {
        let options: MapOptions = serde_json::from_str(
            r#"{"center": {"lon": 10.0, "lat": 0.0}, "projection": "equirectangular", "graticule": null}"#,
        )
        .unwrap();
        assert_eq!(options.center, lonlat!(10.0, 0.0));
        assert_eq!(options.projection, ProjectionKind::Equirectangular);
        assert_eq!(options.graticule, None);
        assert_eq!(options.size, Size::new(960.0, 500.0));
    }
}
