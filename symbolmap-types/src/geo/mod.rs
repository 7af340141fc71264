//! Geometries in geographic coordinates (see [`GeoPoint`]) and world projections that convert them into planar
//! coordinates (see [`Projection`]).

mod equirectangular;
mod natural_earth;
mod point;
mod projection;

pub use equirectangular::Equirectangular;
pub use natural_earth::NaturalEarth;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
pub use projection::Projection;
