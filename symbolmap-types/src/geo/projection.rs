/// Conversion of points between two coordinate systems.
///
/// Projections may be partial: a point that has no image in the target coordinate system (or is not a valid point of
/// the source system) is projected into `None`.
pub trait Projection {
    /// Type of the input point.
    type InPoint;
    /// Type of the output point.
    type OutPoint;

    /// Projects the point from the source into the target coordinate system.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Projects the point from the target into the source coordinate system.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
