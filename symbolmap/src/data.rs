//! Immutable input snapshots of a render pass.
//!
//! Land and border geometry are loaded once and never change after that. Incident records are replaced as a whole
//! each time a new dataset is loaded. None of the types here has mutating methods; cloning a snapshot is cheap since
//! the data is reference counted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use symbolmap_types::geo::{GeoPoint, GeoPoint2d};
use symbolmap_types::impls::MultiContour;
use symbolmap_types::Geom;

use crate::error::SymbolmapError;

/// A land feature: polygon or multipolygon geometry with an opaque set of properties.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    geometry: Geom<GeoPoint2d>,
    properties: Map<String, Value>,
}

impl GeoFeature {
    /// Creates a new feature.
    pub fn new(geometry: Geom<GeoPoint2d>, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Geometry of the feature.
    pub fn geometry(&self) -> &Geom<GeoPoint2d> {
        &self.geometry
    }

    /// Properties of the feature as they were loaded.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}

/// Ordered sequence of land features.
///
/// The position of a feature in the collection is its identity. The order is fixed at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandCollection {
    features: Arc<[GeoFeature]>,
}

impl LandCollection {
    /// Creates a new collection.
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self {
            features: features.into(),
        }
    }

    /// Features of the collection.
    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if there are no features in the collection.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Single geometry with all internal country borders. Every shared border is stored once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderMesh {
    geometry: Arc<MultiContour<GeoPoint2d>>,
}

impl BorderMesh {
    /// Creates a new mesh.
    pub fn new(geometry: MultiContour<GeoPoint2d>) -> Self {
        Self {
            geometry: Arc::new(geometry),
        }
    }

    /// Geometry of the mesh.
    pub fn geometry(&self) -> &MultiContour<GeoPoint2d> {
        &self.geometry
    }
}

/// Land and borders, loaded together from one topology source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologySnapshot {
    land: LandCollection,
    borders: BorderMesh,
}

impl TopologySnapshot {
    /// Creates a new snapshot.
    pub fn new(land: LandCollection, borders: BorderMesh) -> Self {
        Self { land, borders }
    }

    /// Land features.
    pub fn land(&self) -> &LandCollection {
        &self.land
    }

    /// Border mesh.
    pub fn borders(&self) -> &BorderMesh {
        &self.borders
    }
}

/// Identity of an incident record as given by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncidentId {
    /// Position of the record in the source (used when the source has no identity field).
    Index(usize),
    /// Identity string taken from the source.
    Name(String),
}

impl std::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentId::Index(index) => write!(f, "#{index}"),
            IncidentId::Name(name) => write!(f, "{name}"),
        }
    }
}

/// A point located incident with a non-negative magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    id: IncidentId,
    position: GeoPoint2d,
    magnitude: f64,
}

impl IncidentRecord {
    /// Creates a new record.
    ///
    /// Coordinates are given in *longitude, latitude* order. Returns an error if a coordinate is not finite or out of
    /// range, or if the magnitude is negative or not finite.
    ///
    /// ```
    /// use symbolmap::{IncidentId, IncidentRecord};
    ///
    /// let record = IncidentRecord::new(IncidentId::Index(0), -99.13, 19.43, 50.0).unwrap();
    /// assert_eq!(record.magnitude(), 50.0);
    ///
    /// assert!(IncidentRecord::new(IncidentId::Index(1), 19.43, -99.13, 50.0).is_err());
    /// ```
    pub fn new(id: IncidentId, lon: f64, lat: f64, magnitude: f64) -> Result<Self, SymbolmapError> {
        let position = GeoPoint2d::validated(lon, lat)?;
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(SymbolmapError::InvalidMagnitude(magnitude));
        }

        Ok(Self {
            id,
            position,
            magnitude,
        })
    }

    /// Creates a record without validating its values.
    ///
    /// Renderers skip records that are invalid, so this can be used to pass data that was validated elsewhere.
    pub fn new_unchecked(id: IncidentId, position: GeoPoint2d, magnitude: f64) -> Self {
        Self {
            id,
            position,
            magnitude,
        }
    }

    /// Identity of the record.
    pub fn id(&self) -> &IncidentId {
        &self.id
    }

    /// Position of the incident.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Magnitude of the incident.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns true if the position is valid and the magnitude is a finite non-negative number.
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.magnitude.is_finite() && self.magnitude >= 0.0
    }
}

/// Ordered list of incident records of one dataset load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentSnapshot {
    records: Arc<[IncidentRecord]>,
}

impl IncidentSnapshot {
    /// Creates a new snapshot.
    pub fn new(records: Vec<IncidentRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Records of the snapshot.
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The largest magnitude of the valid records, or `0` if there are none.
    pub fn max_magnitude(&self) -> f64 {
        self.records
            .iter()
            .filter(|r| r.is_valid())
            .map(|r| r.magnitude)
            .fold(0.0, f64::max)
    }
}

impl FromIterator<IncidentRecord> for IncidentSnapshot {
    fn from_iter<T: IntoIterator<Item = IncidentRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
