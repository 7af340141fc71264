//! Geometry types shared by the `symbolmap` crates.
//!
//! The crate is trait based: [`Contour`], [`Polygon`], [`MultiPolygon`] and [`MultiContour`] describe the shape of a
//! geometry without fixing its storage, and the [`impls`] module contains simple owned implementations of them. Points
//! are either geographic ([`geo::GeoPoint`]) or cartesian ([`cartesian::CartesianPoint2d`]).
//!
//! World projections that convert geographic points into planar coordinates live in [`geo`].

pub mod cartesian;
pub mod contour;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod impls;
pub mod multi_contour;
pub mod multi_polygon;
pub mod polygon;

#[cfg(feature = "geo-types")]
mod geo_types;

pub use contour::Contour;
pub use geometry::Geom;
pub use multi_contour::MultiContour;
pub use multi_polygon::MultiPolygon;
pub use polygon::Polygon;
