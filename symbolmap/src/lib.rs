//! Symbolmap renders proportional symbol world maps: incident records drawn as circles whose *area* is proportional
//! to their magnitude, over a world map of land polygons and country borders.
//!
//! # Quick start
//!
//! ```no_run
//! use symbolmap::loader::{load_map_data, FileIncidentSource, FileTopologySource};
//! use symbolmap::{MapBuilder, SvgWriter};
//!
//! # tokio_test::block_on(async {
//! let data = load_map_data(
//!     &FileTopologySource::new("world-110m.json"),
//!     &FileIncidentSource::new("incidents.csv"),
//! )
//! .await?;
//!
//! let map = MapBuilder::default().with_size(960.0, 500.0).build();
//! let frame = map.render_data(&data)?;
//! std::fs::write("map.svg", SvgWriter::default().render(&frame))?;
//! # Ok::<(), symbolmap::error::SymbolmapError>(())
//! # });
//! ```
//!
//! # Main components
//!
//! * [`GeoProjector`] converts longitude/latitude pairs into screen positions. One projector is shared by all layers
//!   of a render pass, so land, borders and symbols line up exactly.
//! * [`PathBuilder`] converts polygons, multipolygons and line meshes into vector [`Path`]s.
//! * [`RadiusScale`] maps magnitudes to circle radii with a square root scale.
//! * [`layers`](layer) turn the input data into ordered [draw operations](render::DrawOp).
//! * [`Map`] runs the layers in the fixed order (background, land, borders, symbols) and returns a
//!   [`Frame`](render::Frame), which a backend such as [`SvgWriter`] turns into an image.
//!
//! Input data is loaded with the [`loader`] module into immutable snapshots. Loading is asynchronous; rendering is
//! synchronous, pure and deterministic.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod data;
pub mod error;
pub mod graticule;
pub mod layer;
pub mod loader;
mod map;
pub mod path;
pub mod projector;
pub mod render;
pub mod scale;

pub use color::Color;
pub use data::{
    BorderMesh, GeoFeature, IncidentId, IncidentRecord, IncidentSnapshot, LandCollection, TopologySnapshot,
};
pub use graticule::Graticule;
pub use map::{Map, MapBuilder, MapData, MapOptions};
pub use path::{Path, PathBuilder, PathCommand};
pub use projector::{GeoProjector, ProjectionKind};
pub use render::{SvgStyle, SvgWriter};
pub use scale::RadiusScale;

// Reexport symbolmap_types
pub use symbolmap_types;
