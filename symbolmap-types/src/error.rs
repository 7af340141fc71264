//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolmapTypesError {
    /// Longitude or latitude is not finite or is outside of the valid range.
    #[error("invalid coordinate: longitude {lon}, latitude {lat}")]
    InvalidCoordinate {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
}
