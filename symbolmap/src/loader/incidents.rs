//! Decoding of incident records from CSV tables.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::data::{IncidentId, IncidentRecord, IncidentSnapshot};
use crate::error::SymbolmapError;

/// Order of the two numbers in a combined coordinates column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateOrder {
    /// `"latitude, longitude"`.
    #[default]
    LatLon,
    /// `"longitude, latitude"`.
    LonLat,
}

/// Columns the incident position is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateColumns {
    /// Both coordinates in one column, separated by a comma.
    Combined {
        /// Column name.
        field: String,
        /// Order of the coordinates in the column.
        #[serde(default)]
        order: CoordinateOrder,
    },
    /// Longitude and latitude in their own columns.
    Separate {
        /// Longitude column name.
        lon_field: String,
        /// Latitude column name.
        lat_field: String,
    },
}

impl Default for CoordinateColumns {
    fn default() -> Self {
        Self::Combined {
            field: "Location Coordinates".to_string(),
            order: CoordinateOrder::LatLon,
        }
    }
}

/// Describes how incident records are laid out in a table.
///
/// ```
/// use symbolmap::loader::{CoordinateColumns, IncidentSchema};
///
/// let schema: IncidentSchema = serde_json::from_str(r#"{
///     "magnitude_field": "deaths",
///     "coordinates": {"separate": {"lon_field": "lng", "lat_field": "lat"}},
///     "id_field": null
/// }"#).unwrap();
/// assert_eq!(schema.magnitude_field, "deaths");
/// assert!(matches!(schema.coordinates, CoordinateColumns::Separate { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentSchema {
    /// Column with the magnitude. Empty cells are read as `0`.
    pub magnitude_field: String,
    /// Columns with the position.
    pub coordinates: CoordinateColumns,
    /// Column with the record identity. If not set or not present in the table, the row index is used.
    pub id_field: Option<String>,
}

impl Default for IncidentSchema {
    fn default() -> Self {
        Self {
            magnitude_field: "Total Dead and Missing".to_string(),
            coordinates: CoordinateColumns::default(),
            id_field: Some("Web ID".to_string()),
        }
    }
}

enum PositionColumns {
    Combined { column: usize, order: CoordinateOrder },
    Separate { lon: usize, lat: usize },
}

struct ColumnIndices {
    magnitude: usize,
    position: PositionColumns,
    id: Option<usize>,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, schema: &IncidentSchema) -> Result<Self, SymbolmapError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| SymbolmapError::Decoding(format!("column '{name}' not found")))
        };

        let position = match &schema.coordinates {
            CoordinateColumns::Combined { field, order } => PositionColumns::Combined {
                column: find(field)?,
                order: *order,
            },
            CoordinateColumns::Separate { lon_field, lat_field } => PositionColumns::Separate {
                lon: find(lon_field)?,
                lat: find(lat_field)?,
            },
        };

        let id = match &schema.id_field {
            Some(field) => {
                let id = find(field).ok();
                if id.is_none() {
                    log::warn!("Identity column '{field}' not found, using row indices");
                }
                id
            }
            None => None,
        };

        Ok(Self {
            magnitude: find(&schema.magnitude_field)?,
            position,
            id,
        })
    }

    fn record(&self, row: usize, record: &csv::StringRecord) -> Result<IncidentRecord, String> {
        let cell = |column: usize| record.get(column).unwrap_or_default().trim();

        let magnitude = parse_magnitude(cell(self.magnitude))?;
        let (lon, lat) = match self.position {
            PositionColumns::Combined { column, order } => parse_pair(cell(column), order)?,
            PositionColumns::Separate { lon, lat } => (parse_number(cell(lon))?, parse_number(cell(lat))?),
        };

        let id = match self.id.map(cell) {
            Some(id) if !id.is_empty() => IncidentId::Name(id.to_string()),
            _ => IncidentId::Index(row),
        };

        IncidentRecord::new(id, lon, lat, magnitude).map_err(|err| err.to_string())
    }
}

fn parse_number(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("'{value}' is not a number"))
}

fn parse_magnitude(value: &str) -> Result<f64, String> {
    if value.is_empty() {
        return Ok(0.0);
    }

    parse_number(value)
}

fn parse_pair(value: &str, order: CoordinateOrder) -> Result<(f64, f64), String> {
    let Some((first, second)) = value.split_once(',') else {
        return Err(format!("'{value}' is not a coordinate pair"));
    };

    let first = parse_number(first.trim())?;
    let second = parse_number(second.trim())?;

    Ok(match order {
        CoordinateOrder::LatLon => (second, first),
        CoordinateOrder::LonLat => (first, second),
    })
}

/// Reads incident records from a CSV table with a header row.
///
/// Returns an error if the table cannot be read or a column required by the schema is missing. Rows with invalid
/// coordinates or magnitudes are skipped with a warning. Row indices used as identities count data rows from `0`.
pub fn decode_incidents(reader: impl Read, schema: &IncidentSchema) -> Result<IncidentSnapshot, SymbolmapError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnIndices::resolve(reader.headers()?, schema)?;

    let mut records = vec![];
    let mut skipped = 0;
    for (row, result) in reader.records().enumerate() {
        let parsed = result
            .map_err(|err| err.to_string())
            .and_then(|record| columns.record(row, &record));

        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::warn!("Skipping incident row {row}: {reason}");
                skipped += 1;
            }
        }
    }

    log::info!(
        "Decoded {} incident records, skipped {skipped} rows",
        records.len()
    );

    Ok(IncidentSnapshot::new(records))
}
