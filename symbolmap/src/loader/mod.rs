//! Loading of the map input data.
//!
//! Data is loaded asynchronously from [`TopologySource`] and [`IncidentSource`] implementations and converted into
//! immutable snapshots. [`load_map_data`] loads both snapshots concurrently. Rendering itself is synchronous and
//! starts only after the data is loaded.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::data::{IncidentSnapshot, TopologySnapshot};
use crate::error::SymbolmapError;
use crate::map::MapData;

#[cfg(feature = "geojson")]
pub mod geojson;
pub mod incidents;
pub mod topojson;

pub use incidents::{decode_incidents, CoordinateColumns, CoordinateOrder, IncidentSchema};
pub use topojson::{decode_topojson, BorderFilter, TopologyObjects};

/// Source of land and border geometry.
#[async_trait]
pub trait TopologySource: Send + Sync {
    /// Loads the topology snapshot.
    async fn load_topology(&self) -> Result<TopologySnapshot, SymbolmapError>;
}

/// Source of incident records.
#[async_trait]
pub trait IncidentSource: Send + Sync {
    /// Loads the incident snapshot.
    async fn load_incidents(&self) -> Result<IncidentSnapshot, SymbolmapError>;
}

#[async_trait]
impl TopologySource for TopologySnapshot {
    async fn load_topology(&self) -> Result<TopologySnapshot, SymbolmapError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl IncidentSource for IncidentSnapshot {
    async fn load_incidents(&self) -> Result<IncidentSnapshot, SymbolmapError> {
        Ok(self.clone())
    }
}

/// Decodes a topology document. TopoJSON documents are recognized by their `"type": "Topology"`; anything else is
/// decoded as GeoJSON (if the `geojson` feature is enabled).
pub fn decode_topology(text: &str, objects: &TopologyObjects) -> Result<TopologySnapshot, SymbolmapError> {
    #[derive(Deserialize)]
    struct TypeTag {
        #[serde(rename = "type")]
        kind: Option<String>,
    }

    let tag: TypeTag = serde_json::from_str(text)?;
    match tag.kind.as_deref() {
        Some("Topology") => decode_topojson(text, objects),
        #[cfg(feature = "geojson")]
        _ => geojson::decode_geojson(text),
        #[cfg(not(feature = "geojson"))]
        other => Err(SymbolmapError::Decoding(format!(
            "unsupported topology document type: {other:?}"
        ))),
    }
}

/// Topology read from a TopoJSON or GeoJSON file.
#[derive(Debug, Clone)]
pub struct FileTopologySource {
    path: PathBuf,
    objects: TopologyObjects,
}

impl FileTopologySource {
    /// Creates a new source reading the default object names.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            objects: TopologyObjects::default(),
        }
    }

    /// Sets the names of the TopoJSON objects to read.
    pub fn with_objects(mut self, objects: TopologyObjects) -> Self {
        self.objects = objects;
        self
    }
}

#[async_trait]
impl TopologySource for FileTopologySource {
    async fn load_topology(&self) -> Result<TopologySnapshot, SymbolmapError> {
        log::trace!("Loading topology from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        log::trace!("Topology file loaded. Byte size: {}", text.len());

        let snapshot = decode_topology(&text, &self.objects)?;
        log::info!("Loaded topology from {}", self.path.display());

        Ok(snapshot)
    }
}

/// Incident records read from a CSV file.
#[derive(Debug, Clone)]
pub struct FileIncidentSource {
    path: PathBuf,
    schema: IncidentSchema,
}

impl FileIncidentSource {
    /// Creates a new source with the default schema.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            schema: IncidentSchema::default(),
        }
    }

    /// Sets the table schema.
    pub fn with_schema(mut self, schema: IncidentSchema) -> Self {
        self.schema = schema;
        self
    }
}

#[async_trait]
impl IncidentSource for FileIncidentSource {
    async fn load_incidents(&self) -> Result<IncidentSnapshot, SymbolmapError> {
        log::trace!("Loading incidents from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        log::trace!("Incidents file loaded. Byte size: {}", bytes.len());

        let snapshot = decode_incidents(bytes.as_slice(), &self.schema)?;
        log::info!("Loaded incidents from {}", self.path.display());

        Ok(snapshot)
    }
}

/// Loads the topology and the incidents concurrently.
///
/// Fails with the first error of either load; no partial data is returned.
pub async fn load_map_data(
    topology: &dyn TopologySource,
    incidents: &dyn IncidentSource,
) -> Result<MapData, SymbolmapError> {
    let (topology, incidents) = tokio::try_join!(topology.load_topology(), incidents.load_incidents())?;
    Ok(MapData::new(topology, incidents))
}
