//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not connected. A shared border between two countries
//!   is an open contour.
//! * **closed** - the first and the last points are connected. A shoreline is a closed contour.
//!
//! Unlike OGC `LineString`, a closed contour does not repeat its first point at the end. Use
//! [`Contour::iter_points_closing`] to get the closing point when it is needed.

/// Sequence of points. See module level documentation for details.
pub trait Contour {
    /// Type of the points the contour is consisted of.
    type Point;

    /// Whether the contour is closed.
    fn is_closed(&self) -> bool;

    /// Iterate over the points of the contour.
    ///
    /// The last point is not the same as the first one even for the closed contours.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point>;

    /// Same as [`Contour::iter_points`] but for closed contours repeats the first point again at the end of the iterator.
    fn iter_points_closing(&self) -> impl Iterator<Item = &'_ Self::Point> {
        let closing = if self.is_closed() {
            self.iter_points().next()
        } else {
            None
        };
        self.iter_points().chain(closing)
    }
}
