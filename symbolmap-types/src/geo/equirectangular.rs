use std::marker::PhantomData;

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::point::NewGeoPoint;
use crate::geo::projection::Projection;

/// Equirectangular (plate carrée) projection: `x = λ`, `y = φ` on the unit sphere.
#[derive(Debug, Copy, Clone)]
pub struct Equirectangular<In, Out> {
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> Equirectangular<In, Out> {
    /// Creates a new instance.
    pub fn new() -> Self {
        Self {
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for Equirectangular<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for Equirectangular<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let x = input.lon_rad();
        let y = input.lat_rad();
        if x.is_finite() && y.is_finite() {
            Some(Out::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        Some(In::lonlat(input.x().to_degrees(), input.y().to_degrees()))
    }
}
