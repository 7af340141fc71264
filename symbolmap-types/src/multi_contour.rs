/// Geometry consisting of several contours.
///
/// A pre-merged border mesh is a multi contour: every shared boundary is stored once as an open contour.
pub trait MultiContour {
    /// Contour type.
    type Contour: crate::contour::Contour;

    /// Iterator over contours.
    fn contours(&self) -> impl Iterator<Item = &'_ Self::Contour>;
}
