//! Grid of meridians and parallels.

use serde::{Deserialize, Serialize};
use symbolmap_types::geo::{GeoPoint2d, NewGeoPoint};
use symbolmap_types::impls::{Contour, MultiContour};

/// Parameters of a meridian/parallel grid.
///
/// Meridians are placed every `step` degrees of longitude and span latitudes `[-80, 80]`, except for the ones at
/// multiples of 90 degrees that go from pole to pole. Parallels are placed every `step` degrees in `[-80, 80]`. Lines
/// are sampled every `precision` degrees so that they bend with the projection.
///
/// Values smaller than 1 degree for `step` and 0.1 degree for `precision` are raised to these limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Graticule {
    /// Distance between neighbouring lines, in degrees.
    pub step: f64,
    /// Distance between neighbouring vertices of a line, in degrees.
    pub precision: f64,
}

const MINOR_EXTENT: f64 = 80.0;
const MAJOR_STEP: f64 = 90.0;
const MIN_STEP: f64 = 1.0;
const MIN_PRECISION: f64 = 0.1;

impl Default for Graticule {
    fn default() -> Self {
        Self {
            step: 10.0,
            precision: 2.5,
        }
    }
}

impl Graticule {
    /// Generates the grid lines: meridians from west to east followed by parallels from south to north.
    ///
    /// Returns an empty geometry if `step` or `precision` is not a positive number.
    pub fn lines(&self) -> MultiContour<GeoPoint2d> {
        if !(self.step > 0.0 && self.precision > 0.0) {
            return MultiContour::default();
        }

        let step = self.step.max(MIN_STEP);
        let precision = self.precision.max(MIN_PRECISION);
        let mut parts = vec![];

        for lon in steps(-180.0, 180.0, step) {
            let extent = if (lon % MAJOR_STEP).abs() < 1e-9 {
                90.0
            } else {
                MINOR_EXTENT
            };
            let points = sample(-extent, extent, precision)
                .map(|lat| GeoPoint2d::lonlat(lon, lat))
                .collect();
            parts.push(Contour::open(points));
        }

        for lat in steps(-MINOR_EXTENT, MINOR_EXTENT + step / 2.0, step) {
            let points = sample(-180.0, 180.0, precision)
                .map(|lon| GeoPoint2d::lonlat(lon, lat))
                .collect();
            parts.push(Contour::open(points));
        }

        MultiContour::from(parts)
    }
}

// Values `from, from + step, ...` strictly less than `to`.
fn steps(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = ((to - from) / step).ceil().max(0.0) as usize;
    (0..count).map(move |i| from + i as f64 * step)
}

// Values from `from` to `to` inclusive, `step` apart (the last interval may be shorter).
fn sample(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    steps(from, to, step).chain(std::iter::once(to))
}

#[cfg(test)]
mod tests {
    use symbolmap_types::geo::GeoPoint;

    use super::*;

    #[test]
    fn default_grid() {
        let lines = Graticule::default().lines();
        // 36 meridians and 17 parallels
        assert_eq!(lines.parts().len(), 36 + 17);

        let first = &lines.parts()[0];
        assert_eq!(first.points().first(), Some(&GeoPoint2d::lonlat(-180.0, -90.0)));
        assert_eq!(first.points().last(), Some(&GeoPoint2d::lonlat(-180.0, 90.0)));
        assert_eq!(first.points().len(), 73);

        let minor = &lines.parts()[1];
        assert_eq!(minor.points()[0].lon(), -170.0);
        assert_eq!(minor.points()[0].lat(), -80.0);
        assert_eq!(minor.points().len(), 65);

        let equator = &lines.parts()[36 + 8];
        assert!(equator.points().iter().all(|p| p.lat() == 0.0));
        assert_eq!(equator.points().len(), 145);
    }

    #[test]
    fn all_vertices_are_valid() {
        let lines = Graticule {
            step: 15.0,
            precision: 4.0,
        }
        .lines();
        assert!(lines
            .parts()
            .iter()
            .flat_map(|c| c.points())
            .all(|p| p.is_valid()));
    }

    #[test]
    fn invalid_parameters_give_empty_grid() {
        let grid = Graticule {
            step: 0.0,
            precision: 2.5,
        };
        assert!(grid.lines().parts().is_empty());

        let grid = Graticule {
            step: 10.0,
            precision: f64::NAN,
        };
        assert!(grid.lines().parts().is_empty());
    }

    #[test]
    fn tiny_parameters_are_raised_to_limits() {
        let lines = Graticule {
            step: 1e-12,
            precision: 1e-12,
        }
        .lines();

        // 360 meridians and 161 parallels
        assert_eq!(lines.parts().len(), 360 + 161);
        assert_eq!(lines.parts()[1].points()[0].lon(), -179.0);
        assert_eq!(lines.parts()[0].points().last(), Some(&GeoPoint2d::lonlat(-180.0, 90.0)));
        assert!(lines.parts()[0].points().len() > 1000);
    }
}
