use symbolmap_types::cartesian::Size;
use symbolmap_types::geo::{GeoPoint, GeoPoint2d, NewGeoPoint};

use super::{Map, MapOptions};
use crate::graticule::Graticule;
use crate::projector::ProjectionKind;

/// Convenience type to initialize a [Map].
///
/// ```
/// use symbolmap::{MapBuilder, ProjectionKind};
///
/// let map = MapBuilder::default()
///     .with_size(800.0, 400.0)
///     .with_padding(10.0)
///     .with_lonlat(10.0, 0.0)
///     .with_projection(ProjectionKind::NaturalEarth)
///     .build();
///
/// assert_eq!(map.options().size.width(), 800.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    options: MapOptions,
}

impl MapBuilder {
    /// Starts from the given options instead of the default ones.
    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the viewport size in pixels.
    ///
    /// Defaults to 960x500.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.options.size = Size::new(width, height);
        self
    }

    /// Sets the padding around the fitted sphere.
    ///
    /// Defaults to `0`.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.options.padding = padding;
        self
    }

    /// Sets the geographic point placed in the middle of the viewport.
    ///
    /// Defaults to [0, 0].
    pub fn with_center(mut self, center: impl GeoPoint<Num = f64>) -> Self {
        self.options.center = GeoPoint2d::from(&center);
        self
    }

    /// Sets the middle of the viewport by longitude and latitude.
    ///
    /// ```
    /// use symbolmap::MapBuilder;
    /// use symbolmap::symbolmap_types::geo::GeoPoint;
    ///
    /// let map = MapBuilder::default().with_lonlat(-99.13, 19.43).build();
    /// assert_eq!(map.projector().center().lon(), -99.13);
    /// ```
    pub fn with_lonlat(self, lon: f64, lat: f64) -> Self {
        self.with_center(GeoPoint2d::lonlat(lon, lat))
    }

    /// Sets the projection family.
    ///
    /// Defaults to [`ProjectionKind::NaturalEarth`].
    pub fn with_projection(mut self, projection: ProjectionKind) -> Self {
        self.options.projection = projection;
        self
    }

    /// Sets an explicit projection scale instead of fitting the sphere into the viewport.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.options.scale = Some(scale);
        self
    }

    /// Sets the radius of the largest symbol.
    ///
    /// Defaults to `15`.
    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.options.max_radius = max_radius;
        self
    }

    /// Sets whether symbol radii are clamped to the maximum radius.
    pub fn with_radius_clamp(mut self, clamp: bool) -> Self {
        self.options.clamp = clamp;
        self
    }

    /// Sets the graticule, or disables it with `None`.
    pub fn with_graticule(mut self, graticule: Option<Graticule>) -> Self {
        self.options.graticule = graticule;
        self
    }

    /// Consumes the builder and creates a map instance.
    pub fn build(self) -> Map {
        Map::new(self.options)
    }
}
