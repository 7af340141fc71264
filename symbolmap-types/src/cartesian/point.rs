use approx::AbsDiffEq;
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// A point in 2-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point2<Num = f64> {
    x: Num,
    y: Num,
}

/// Point with `f64` coordinates. Screen positions produced by projections use this type.
pub type Point2d = Point2<f64>;

impl<Num> Point2<Num> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: Num, y: Num) -> Self {
        Self { x, y }
    }

    /// Returns coordinates of the point as an array of `Num`.
    pub fn coords(&self) -> [Num; 2]
    where
        Num: Copy,
    {
        [self.x, self.y]
    }
}

/// Vector between two points in 2-dimensional cartesian coordinate space.
#[derive(Debug, Default, Copy, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub struct Vector2<Num = f64> {
    dx: Num,
    dy: Num,
}

impl<Num: Copy> Vector2<Num> {
    /// Creates a new vector with the given coordinates.
    pub fn new(dx: Num, dy: Num) -> Self {
        Self { dx, dy }
    }

    /// Returns x coordinate of the vector.
    pub fn dx(&self) -> Num {
        self.dx
    }

    /// Returns y coordinate of the vector.
    pub fn dy(&self) -> Num {
        self.dy
    }

    /// Returns magnitude (length) of the vector.
    pub fn magnitude(&self) -> Num
    where
        Num: num_traits::Float,
    {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

impl<Num> std::ops::Sub<Point2<Num>> for Point2<Num>
where
    Num: std::ops::Sub<Num, Output = Num>,
{
    type Output = Vector2<Num>;

    fn sub(self, rhs: Point2<Num>) -> Self::Output {
        Vector2 {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl<Num> std::ops::Add<Vector2<Num>> for Point2<Num>
where
    Num: std::ops::Add<Num, Output = Num>,
{
    type Output = Point2<Num>;

    fn add(self, rhs: Vector2<Num>) -> Self::Output {
        Self {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

impl<Num> AbsDiffEq for Point2<Num>
where
    Num: AbsDiffEq<Num, Epsilon = Num> + Copy,
{
    type Epsilon = Num;

    fn default_epsilon() -> Self::Epsilon {
        Num::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

/// A point in 2d cartesian coordinate space.
pub trait CartesianPoint2d {
    /// Numeric type used to represent coordinates.
    type Num: Num + Copy + PartialOrd;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Returns true if both coordinates of the points are exactly equal.
    fn equal(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Squared euclidean distance between two points.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = self.x() - other.x();
        let dy = self.y() - other.y();
        dx * dx + dy * dy
    }
}

/// A cartesian point that can be constructed from its coordinates.
pub trait NewCartesianPoint2d<Num = f64>: CartesianPoint2d<Num = Num> {
    /// Creates a new point.
    fn new(x: Num, y: Num) -> Self;
}

impl<N: Num + Copy + PartialOrd> CartesianPoint2d for Point2<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }
}

impl<N: Num + Copy + PartialOrd> NewCartesianPoint2d<N> for Point2<N> {
    fn new(x: N, y: N) -> Self {
        Point2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_sq() {
        let a = Point2d::new(1.0, 1.0);
        let b = Point2d::new(4.0, 5.0);
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!((b - a).magnitude(), 5.0);
        assert!(a.equal(&(a + Vector2::new(0.0, 0.0))));
    }
}
