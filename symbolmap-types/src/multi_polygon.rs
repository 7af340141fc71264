/// Geometry consisting of several polygons.
pub trait MultiPolygon {
    /// Polygon type.
    type Polygon: crate::polygon::Polygon;

    /// Iterates over polygons.
    fn polygons(&self) -> impl Iterator<Item = &'_ Self::Polygon>;
}
