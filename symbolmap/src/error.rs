//! Error types used by the crate.

use symbolmap_types::error::SymbolmapTypesError;
use thiserror::Error;

/// Snapshot that a render pass needs but that has not been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSnapshot {
    /// Land and border geometry.
    Topology,
    /// Incident records.
    Incidents,
    /// Neither of the snapshots is loaded.
    Both,
}

impl std::fmt::Display for MissingSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingSnapshot::Topology => write!(f, "topology"),
            MissingSnapshot::Incidents => write!(f, "incidents"),
            MissingSnapshot::Both => write!(f, "topology and incidents"),
        }
    }
}

/// Symbolmap error type.
#[derive(Debug, Error)]
pub enum SymbolmapError {
    /// A render was requested before all input data was loaded.
    #[error("map data is not loaded yet: missing {0}")]
    MissingData(MissingSnapshot),
    /// Longitude or latitude out of valid range or not finite.
    #[error("invalid coordinate: longitude {lon}, latitude {lat}")]
    InvalidCoordinate {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },
    /// Magnitude is negative or not a number.
    #[error("invalid magnitude: {0}")]
    InvalidMagnitude(f64),
    /// Error decoding data.
    #[error("failed to decode data: {0}")]
    Decoding(String),
    /// Error reading a JSON document.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// Error reading a CSV document.
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    /// Error reading a GeoJSON document.
    #[cfg(feature = "geojson")]
    #[error("invalid geojson: {0}")]
    GeoJson(#[from] geojson::Error),
    /// Error reading/writing data to the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

impl From<SymbolmapTypesError> for SymbolmapError {
    fn from(value: SymbolmapTypesError) -> Self {
        match value {
            SymbolmapTypesError::InvalidCoordinate { lon, lat } => Self::InvalidCoordinate { lon, lat },
            SymbolmapTypesError::Conversion(message) => Self::Decoding(message),
        }
    }
}
