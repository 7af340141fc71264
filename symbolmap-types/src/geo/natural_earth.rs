use std::marker::PhantomData;

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::point::NewGeoPoint;
use crate::geo::projection::Projection;

const INVERSE_EPSILON: f64 = 1e-6;
const INVERSE_MAX_ITERATIONS: usize = 25;

/// Natural Earth I projection.
///
/// A pseudocylindrical compromise projection for world maps. It is neither conformal nor equal-area: both shapes and
/// areas are distorted a little, but nothing is distorted too much. Output coordinates are for the unit sphere, so the
/// whole world fits into `[-2.7354, 2.7354] x [-1.4224, 1.4224]`.
#[derive(Debug, Copy, Clone)]
pub struct NaturalEarth<In, Out> {
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> NaturalEarth<In, Out> {
    /// Creates a new instance.
    pub fn new() -> Self {
        Self {
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }

    fn forward(lambda: f64, phi: f64) -> (f64, f64) {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        let x = lambda
            * (0.8707 - 0.131979 * phi2
                + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
        let y = phi
            * (1.007226 + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
        (x, y)
    }

    fn inverse(x: f64, y: f64) -> (f64, f64) {
        let mut phi = y;
        for _ in 0..INVERSE_MAX_ITERATIONS {
            let phi2 = phi * phi;
            let phi4 = phi2 * phi2;
            let delta = (phi
                * (1.007226
                    + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)))
                - y)
                / (1.007226
                    + phi2
                        * (0.015085 * 3.0
                            + phi4
                                * (-0.044475 * 7.0 + 0.028874 * 9.0 * phi2
                                    - 0.005916 * 11.0 * phi4)));
            phi -= delta;
            if delta.abs() <= INVERSE_EPSILON {
                break;
            }
        }

        let phi2 = phi * phi;
        let lambda = x
            / (0.8707
                + phi2 * (-0.131979 + phi2 * (-0.013791 + phi2 * phi2 * phi2 * (0.003971 - 0.001529 * phi2))));
        (lambda, phi)
    }
}

impl<In, Out> Default for NaturalEarth<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for NaturalEarth<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let (x, y) = Self::forward(input.lon_rad(), input.lat_rad());
        if x.is_finite() && y.is_finite() {
            Some(Out::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let (lambda, phi) = Self::inverse(input.x(), input.y());
        let lon = lambda.to_degrees();
        let lat = phi.to_degrees();
        if lon.is_finite() && lat.is_finite() {
            Some(In::lonlat(lon, lat))
        } else {
            None
        }
    }
}
