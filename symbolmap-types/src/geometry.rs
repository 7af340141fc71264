//! See [`Geom`].

use crate::impls::{Contour, MultiContour, MultiPolygon, Polygon};

/// Owned geometry of one of the supported types.
#[derive(Debug, Clone, PartialEq)]
pub enum Geom<P> {
    /// Open or closed contour.
    Contour(Contour<P>),
    /// Several contours, e.g. a merged border mesh.
    MultiContour(MultiContour<P>),
    /// Polygon.
    Polygon(Polygon<P>),
    /// Several polygons.
    MultiPolygon(MultiPolygon<P>),
}

impl<P> Geom<P> {
    /// Total number of points in the geometry.
    pub fn vertex_count(&self) -> usize {
        fn polygon_vertices<P>(polygon: &Polygon<P>) -> usize {
            polygon.outer_contour.points.len()
                + polygon
                    .inner_contours
                    .iter()
                    .map(|c| c.points.len())
                    .sum::<usize>()
        }

        match self {
            Geom::Contour(c) => c.points().len(),
            Geom::MultiContour(mc) => mc.parts().iter().map(|c| c.points().len()).sum(),
            Geom::Polygon(p) => polygon_vertices(p),
            Geom::MultiPolygon(mp) => mp.parts().iter().map(polygon_vertices).sum(),
        }
    }

    /// Returns true for polygon and multipolygon geometries.
    pub fn is_areal(&self) -> bool {
        matches!(self, Geom::Polygon(_) | Geom::MultiPolygon(_))
    }
}

impl<P> From<Contour<P>> for Geom<P> {
    fn from(value: Contour<P>) -> Self {
        Self::Contour(value)
    }
}

impl<P> From<MultiContour<P>> for Geom<P> {
    fn from(value: MultiContour<P>) -> Self {
        Self::MultiContour(value)
    }
}

impl<P> From<Polygon<P>> for Geom<P> {
    fn from(value: Polygon<P>) -> Self {
        Self::Polygon(value)
    }
}

impl<P> From<MultiPolygon<P>> for Geom<P> {
    fn from(value: MultiPolygon<P>) -> Self {
        Self::MultiPolygon(value)
    }
}
