use crate::data::{IncidentSnapshot, TopologySnapshot};
use crate::error::{MissingSnapshot, SymbolmapError};

/// Input data of a map: the topology and incident snapshots, each of which may be not loaded yet.
///
/// Snapshots are only handed out for rendering when both of them are present. Replacing a snapshot creates a new
/// `MapData` instance, the previous one stays unchanged.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    topology: Option<TopologySnapshot>,
    incidents: Option<IncidentSnapshot>,
}

impl MapData {
    /// Creates data with both snapshots present.
    pub fn new(topology: TopologySnapshot, incidents: IncidentSnapshot) -> Self {
        Self {
            topology: Some(topology),
            incidents: Some(incidents),
        }
    }

    /// Returns a copy of the data with the topology snapshot replaced.
    pub fn with_topology(&self, topology: TopologySnapshot) -> Self {
        Self {
            topology: Some(topology),
            incidents: self.incidents.clone(),
        }
    }

    /// Returns a copy of the data with the incident snapshot replaced.
    pub fn with_incidents(&self, incidents: IncidentSnapshot) -> Self {
        Self {
            topology: self.topology.clone(),
            incidents: Some(incidents),
        }
    }

    /// Topology snapshot, if loaded.
    pub fn topology(&self) -> Option<&TopologySnapshot> {
        self.topology.as_ref()
    }

    /// Incident snapshot, if loaded.
    pub fn incidents(&self) -> Option<&IncidentSnapshot> {
        self.incidents.as_ref()
    }

    /// Returns true if both snapshots are loaded.
    pub fn is_ready(&self) -> bool {
        self.topology.is_some() && self.incidents.is_some()
    }

    /// Both snapshots, or [`SymbolmapError::MissingData`] naming the absent ones.
    pub fn snapshots(&self) -> Result<(&TopologySnapshot, &IncidentSnapshot), SymbolmapError> {
        match (&self.topology, &self.incidents) {
            (Some(topology), Some(incidents)) => Ok((topology, incidents)),
            (None, Some(_)) => Err(SymbolmapError::MissingData(MissingSnapshot::Topology)),
            (Some(_), None) => Err(SymbolmapError::MissingData(MissingSnapshot::Incidents)),
            (None, None) => Err(SymbolmapError::MissingData(MissingSnapshot::Both)),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn snapshots_require_both() {
        let empty = MapData::default();
        assert!(!empty.is_ready());
        assert_matches!(
            empty.snapshots(),
            Err(SymbolmapError::MissingData(MissingSnapshot::Both))
        );

        let topology_only = empty.with_topology(TopologySnapshot::default());
        assert_matches!(
            topology_only.snapshots(),
            Err(SymbolmapError::MissingData(MissingSnapshot::Incidents))
        );

        let incidents_only = empty.with_incidents(IncidentSnapshot::default());
        assert_matches!(
            incidents_only.snapshots(),
            Err(SymbolmapError::MissingData(MissingSnapshot::Topology))
        );

        let full = topology_only.with_incidents(IncidentSnapshot::default());
        assert!(full.is_ready());
        assert!(full.snapshots().is_ok());

        // replacing a snapshot does not touch the original
        assert!(topology_only.incidents().is_none());
    }
}
