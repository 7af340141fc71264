//! Types and functions on geometries in cartesian (screen or projected) coordinates.

mod point;
mod size;

pub use point::{CartesianPoint2d, NewCartesianPoint2d, Point2, Point2d, Vector2};
pub use size::Size;
