//! Renders a proportional symbol world map into an SVG file.
//!
//! ```shell
//! symbolmap-cli <topology.json> <incidents.csv> [output.svg] [options.json]
//! ```
//!
//! The topology can be a TopoJSON topology (with `land` and `countries` objects) or a GeoJSON feature collection.
//! The optional `options.json` file configures the map, the SVG style and the input layout, e.g.:
//!
//! ```json
//! {
//!     "size": {"width": 960.0, "height": 500.0},
//!     "max_radius": 20.0,
//!     "style": {"symbol_fill": "#B22222AA"},
//!     "schema": {"magnitude_field": "Total Dead and Missing"}
//! }
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use symbolmap::loader::{load_map_data, FileIncidentSource, FileTopologySource, IncidentSchema, TopologyObjects};
use symbolmap::{MapBuilder, MapOptions, SvgStyle, SvgWriter};

const DEFAULT_OUTPUT: &str = "map.svg";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    #[serde(flatten)]
    map: MapOptions,
    style: SvgStyle,
    objects: TopologyObjects,
    schema: IncidentSchema,
}

struct Args {
    topology: PathBuf,
    incidents: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let (Some(topology), Some(incidents)) = (args.next(), args.next()) else {
            return Err(anyhow!(
                "usage: symbolmap-cli <topology.json> <incidents.csv> [output.svg] [options.json]"
            ));
        };

        Ok(Self {
            topology: topology.into(),
            incidents: incidents.into(),
            output: args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()).into(),
            config: args.next().map(PathBuf::from),
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config = serde_json::from_str(&text).with_context(|| format!("invalid options in {}", path.display()))?;
    log::info!("Using options from {}", path.display());

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse()?;
    let config = load_config(args.config.as_ref())?;

    let topology = FileTopologySource::new(&args.topology).with_objects(config.objects);
    let incidents = FileIncidentSource::new(&args.incidents).with_schema(config.schema);
    let data = load_map_data(&topology, &incidents).await?;

    let map = MapBuilder::default().with_options(config.map).build();
    let frame = map.render_data(&data)?;

    let file = std::fs::File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    SvgWriter::new(config.style).write(&frame, std::io::BufWriter::new(file))?;

    log::info!(
        "Map with {} draw operations written to {}",
        frame.ops().len(),
        args.output.display()
    );

    Ok(())
}
