//! Conversion of geographic coordinates into screen coordinates.

use nalgebra::{Matrix3, Point2 as NaPoint2, Translation2, Vector2};
use serde::{Deserialize, Serialize};
use symbolmap_types::cartesian::{CartesianPoint2d, Point2d, Size};
use symbolmap_types::geo::{Equirectangular, GeoPoint, GeoPoint2d, NaturalEarth, NewGeoPoint, Projection};

use crate::path::Path;

// Step in degrees used to sample the sphere outline.
const OUTLINE_STEP: f64 = 2.5;

/// World projection family used by a [`GeoProjector`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// Natural Earth I compromise projection.
    #[default]
    NaturalEarth,
    /// Plate carrée.
    Equirectangular,
}

impl ProjectionKind {
    fn project_raw(&self, point: &GeoPoint2d) -> Option<Point2d> {
        match self {
            ProjectionKind::NaturalEarth => NaturalEarth::<GeoPoint2d, Point2d>::new().project(point),
            ProjectionKind::Equirectangular => Equirectangular::<GeoPoint2d, Point2d>::new().project(point),
        }
    }

    fn unproject_raw(&self, point: &Point2d) -> Option<GeoPoint2d> {
        match self {
            ProjectionKind::NaturalEarth => NaturalEarth::<GeoPoint2d, Point2d>::new().unproject(point),
            ProjectionKind::Equirectangular => Equirectangular::<GeoPoint2d, Point2d>::new().unproject(point),
        }
    }

    /// Half width and half height of the whole sphere in raw projection units.
    fn half_extent(&self) -> Option<(f64, f64)> {
        let east = self.project_raw(&GeoPoint2d::lonlat(180.0, 0.0))?;
        let north = self.project_raw(&GeoPoint2d::lonlat(0.0, 90.0))?;
        Some((east.x().abs(), north.y().abs()))
    }
}

/// Projects longitude/latitude pairs into screen pixels.
///
/// A projector is a pure function of its configuration: the same projector (or two projectors created with the same
/// parameters) always returns the same position for the same input. All layers of one render pass share one projector
/// so that land, borders and symbols line up exactly.
///
/// The transform is:
/// 1. longitude is rotated so that the center longitude becomes `0` (and wrapped into `[-180, 180]`);
/// 2. the point is projected with the raw [`ProjectionKind`] on the unit sphere;
/// 3. the raw point is shifted so that the center latitude lies at the origin, scaled, flipped vertically (screen `y`
///    grows downwards) and translated.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoProjector {
    kind: ProjectionKind,
    center: GeoPoint2d,
    scale: f64,
    translate: Point2d,
    transform: Matrix3<f64>,
}

impl GeoProjector {
    /// Creates a projector with explicit scale (pixels per unit of the raw projection) and translation (the screen
    /// position of the `center` point).
    pub fn new(kind: ProjectionKind, center: GeoPoint2d, scale: f64, translate: Point2d) -> Self {
        let center_offset = kind
            .project_raw(&GeoPoint2d::lonlat(0.0, center.lat()))
            .unwrap_or_default();

        let transform = Translation2::new(translate.x(), translate.y()).to_homogeneous()
            * Matrix3::new_nonuniform_scaling(&Vector2::new(scale, -scale))
            * Translation2::new(-center_offset.x(), -center_offset.y()).to_homogeneous();

        Self {
            kind,
            center,
            scale,
            translate,
            transform,
        }
    }

    /// Creates a projector with the largest scale that fits the whole sphere into the viewport of the given `size`
    /// minus `padding` on every side. The `center` point is placed in the middle of the viewport.
    pub fn fit(kind: ProjectionKind, center: GeoPoint2d, size: Size, padding: f64) -> Self {
        let available_width = (size.width() - 2.0 * padding).max(0.0);
        let available_height = (size.height() - 2.0 * padding).max(0.0);

        let scale = match kind.half_extent() {
            Some((half_width, half_height)) if half_width > 0.0 && half_height > 0.0 => {
                (available_width / (2.0 * half_width)).min(available_height / (2.0 * half_height))
            }
            _ => 0.0,
        };

        Self::new(
            kind,
            center,
            scale,
            Point2d::new(size.half_width(), size.half_height()),
        )
    }

    /// Projection family.
    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// Geographic point placed at the [translation](Self::translate) point.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Pixels per unit of the raw projection.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Screen position of the center point.
    pub fn translate(&self) -> Point2d {
        self.translate
    }

    /// Projects a point given by its longitude and latitude in degrees.
    ///
    /// Returns `None` if either coordinate is not finite or out of range. Callers must skip such points.
    ///
    /// ```
    /// use symbolmap::{GeoProjector, ProjectionKind};
    /// use symbolmap::symbolmap_types::cartesian::Size;
    /// use symbolmap::symbolmap_types::lonlat;
    ///
    /// let projector = GeoProjector::fit(ProjectionKind::NaturalEarth, lonlat!(0.0, 0.0), Size::new(960.0, 500.0), 0.0);
    /// assert!(projector.project(-99.13, 19.43).is_some());
    /// assert!(projector.project(19.43, -99.13).is_none());
    /// ```
    pub fn project(&self, lon: f64, lat: f64) -> Option<Point2d> {
        let point = GeoPoint2d::lonlat(lon, lat);
        if !point.is_valid() {
            return None;
        }

        self.project_rotated(self.rotate(lon), lat)
    }

    /// Converts a screen position back into geographic coordinates. Returns `None` for positions outside of the
    /// projected sphere.
    pub fn unproject(&self, screen: &Point2d) -> Option<GeoPoint2d> {
        let inverse = self.transform.try_inverse()?;
        let raw = inverse.transform_point(&NaPoint2::new(screen.x(), screen.y()));
        let rotated = self.kind.unproject_raw(&Point2d::new(raw.x, raw.y))?;
        if !rotated.is_valid() {
            return None;
        }

        let point = GeoPoint2d::lonlat(wrap_longitude(rotated.lon() + self.center.lon()), rotated.lat());
        point.is_valid().then_some(point)
    }

    /// Returns true if the segment between two points crosses the antimeridian of the rotated projection, i.e. the
    /// projected segment would jump from one edge of the map to the other.
    pub fn crosses_seam(&self, from: &impl GeoPoint<Num = f64>, to: &impl GeoPoint<Num = f64>) -> bool {
        (self.rotate(to.lon()) - self.rotate(from.lon())).abs() > 180.0
    }

    /// Outline of the whole projected sphere.
    pub fn sphere_outline(&self) -> Path {
        let steps = (180.0 / OUTLINE_STEP) as usize;
        let west = (0..=steps).map(|i| (-180.0, -90.0 + i as f64 * OUTLINE_STEP));
        let east = (0..=steps).map(|i| (180.0, 90.0 - i as f64 * OUTLINE_STEP));

        let mut path = Path::default();
        let mut points = west
            .chain(east)
            .filter_map(|(lambda, phi)| self.project_rotated(lambda, phi));
        if let Some(first) = points.next() {
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
            path.close();
        }

        path
    }

    fn rotate(&self, lon: f64) -> f64 {
        wrap_longitude(lon - self.center.lon())
    }

    fn project_rotated(&self, lambda: f64, phi: f64) -> Option<Point2d> {
        let raw = self.kind.project_raw(&GeoPoint2d::lonlat(lambda, phi))?;
        let screen = self.transform.transform_point(&NaPoint2::new(raw.x(), raw.y()));

        if screen.x.is_finite() && screen.y.is_finite() {
            Some(Point2d::new(screen.x, screen.y))
        } else {
            None
        }
    }
}

impl Projection for GeoProjector {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        GeoProjector::project(self, input.lon(), input.lat())
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        GeoProjector::unproject(self, input)
    }
}

// Values already in [-180, 180] are kept so that both edges of the map stay distinct.
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}
