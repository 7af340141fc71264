//! Vector paths and conversion of geographic geometries into them.

use serde::{Deserialize, Serialize};
use symbolmap_types::cartesian::{CartesianPoint2d, Point2d};
use symbolmap_types::geo::{GeoPoint, GeoPoint2d};
use symbolmap_types::{Contour, Geom, MultiContour, MultiPolygon, Polygon};

use crate::projector::GeoProjector;

/// Single command of a vector path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Starts a new sub-path at the point.
    MoveTo(Point2d),
    /// Draws a straight line from the current point to the given one.
    LineTo(Point2d),
    /// Closes the current sub-path with a line to its first point.
    Close,
}

/// Ordered sequence of path commands in screen coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Creates a path from commands.
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Commands of the path.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns true if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of sub-paths (`MoveTo` commands).
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Starts a new sub-path.
    pub fn move_to(&mut self, point: Point2d) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    /// Adds a line to the current sub-path.
    pub fn line_to(&mut self, point: Point2d) {
        self.commands.push(PathCommand::LineTo(point));
    }

    /// Closes the current sub-path.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Serializes the path into SVG path data (the `d` attribute).
    ///
    /// Coordinates are rounded to 3 decimal digits, so equal paths always give equal strings.
    ///
    /// ```
    /// use symbolmap::{Path, PathCommand};
    /// use symbolmap::symbolmap_types::cartesian::Point2d;
    ///
    /// let path = Path::new(vec![
    ///     PathCommand::MoveTo(Point2d::new(0.0, 0.0)),
    ///     PathCommand::LineTo(Point2d::new(10.5, 0.12345)),
    ///     PathCommand::Close,
    /// ]);
    /// assert_eq!(path.to_svg_data(), "M0,0L10.5,0.123Z");
    /// ```
    pub fn to_svg_data(&self) -> String {
        let mut data = String::with_capacity(self.commands.len() * 16);
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => data.push_str(&format!("M{},{}", format_coord(p.x()), format_coord(p.y()))),
                PathCommand::LineTo(p) => data.push_str(&format!("L{},{}", format_coord(p.x()), format_coord(p.y()))),
                PathCommand::Close => data.push('Z'),
            }
        }

        data
    }
}

fn format_coord(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Builds [`Path`]s from geographic geometries.
///
/// Every vertex is projected with the shared [`GeoProjector`]; invalid vertices are skipped. The builder does a single
/// pass over the vertices, so building is linear in the total vertex count.
///
/// * Polygon rings are emitted as closed sub-paths. A ring with less than 3 valid vertices is dropped, and a polygon
///   with a dropped outer ring is dropped together with its holes.
/// * Open contours are emitted as open sub-paths, split where a segment crosses the projection seam. A piece with less
///   than 2 vertices is dropped.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder<'a> {
    projector: &'a GeoProjector,
}

impl<'a> PathBuilder<'a> {
    /// Creates a new builder.
    pub fn new(projector: &'a GeoProjector) -> Self {
        Self { projector }
    }

    /// Builds a path for any of the owned geometry types.
    pub fn build(&self, geometry: &Geom<GeoPoint2d>) -> Path {
        match geometry {
            Geom::Contour(contour) => self.build_contour(contour),
            Geom::MultiContour(contours) => self.build_multi_contour(contours),
            Geom::Polygon(polygon) => self.build_polygon(polygon),
            Geom::MultiPolygon(polygons) => self.build_multi_polygon(polygons),
        }
    }

    /// Builds a path for a polygon.
    pub fn build_polygon<P>(&self, polygon: &P) -> Path
    where
        P: Polygon,
        <P::Contour as Contour>::Point: GeoPoint<Num = f64>,
    {
        let mut path = Path::default();
        self.append_polygon(&mut path, polygon);
        path
    }

    /// Builds a path for a multipolygon.
    pub fn build_multi_polygon<M>(&self, multi_polygon: &M) -> Path
    where
        M: MultiPolygon,
        <<M::Polygon as Polygon>::Contour as Contour>::Point: GeoPoint<Num = f64>,
    {
        let mut path = Path::default();
        for polygon in multi_polygon.polygons() {
            self.append_polygon(&mut path, polygon);
        }
        path
    }

    /// Builds a path for a single contour.
    pub fn build_contour<C>(&self, contour: &C) -> Path
    where
        C: Contour,
        C::Point: GeoPoint<Num = f64>,
    {
        let mut path = Path::default();
        self.append_contour(&mut path, contour);
        path
    }

    /// Builds a path for a multi contour, e.g. a merged border mesh.
    pub fn build_multi_contour<M>(&self, multi_contour: &M) -> Path
    where
        M: MultiContour,
        <M::Contour as Contour>::Point: GeoPoint<Num = f64>,
    {
        let mut path = Path::default();
        for contour in multi_contour.contours() {
            self.append_contour(&mut path, contour);
        }
        path
    }

    fn append_polygon<P>(&self, path: &mut Path, polygon: &P)
    where
        P: Polygon,
        <P::Contour as Contour>::Point: GeoPoint<Num = f64>,
    {
        if !self.append_ring(path, polygon.outer_contour()) {
            return;
        }

        for hole in polygon.inner_contours() {
            self.append_ring(path, hole);
        }
    }

    fn append_contour<C>(&self, path: &mut Path, contour: &C)
    where
        C: Contour,
        C::Point: GeoPoint<Num = f64>,
    {
        if contour.is_closed() {
            self.append_ring(path, contour);
        } else {
            self.append_line(path, contour);
        }
    }

    fn append_ring<C>(&self, path: &mut Path, ring: &C) -> bool
    where
        C: Contour,
        C::Point: GeoPoint<Num = f64>,
    {
        let mut skipped = 0;
        let points: Vec<Point2d> = ring
            .iter_points()
            .filter_map(|p| {
                let projected = self.project_vertex(p);
                if projected.is_none() {
                    skipped += 1;
                }
                projected
            })
            .collect();

        if skipped > 0 {
            log::debug!("Skipped {skipped} invalid vertices of a ring");
        }

        if points.len() < 3 {
            return false;
        }

        let mut points = points.into_iter();
        if let Some(first) = points.next() {
            path.move_to(first);
        }
        for point in points {
            path.line_to(point);
        }
        path.close();

        true
    }

    fn append_line<C>(&self, path: &mut Path, line: &C)
    where
        C: Contour,
        C::Point: GeoPoint<Num = f64>,
    {
        let mut piece: Vec<Point2d> = Vec::new();
        let mut previous: Option<&C::Point> = None;
        let mut skipped = 0;

        for vertex in line.iter_points() {
            let Some(projected) = self.project_vertex(vertex) else {
                skipped += 1;
                continue;
            };

            if let Some(previous) = previous {
                if self.projector.crosses_seam(previous, vertex) {
                    flush_line(path, &mut piece);
                }
            }

            piece.push(projected);
            previous = Some(vertex);
        }

        flush_line(path, &mut piece);

        if skipped > 0 {
            log::debug!("Skipped {skipped} invalid vertices of a line");
        }
    }

    fn project_vertex(&self, vertex: &impl GeoPoint<Num = f64>) -> Option<Point2d> {
        self.projector.project(vertex.lon(), vertex.lat())
    }
}

fn flush_line(path: &mut Path, piece: &mut Vec<Point2d>) {
    if piece.len() >= 2 {
        let mut points = piece.drain(..);
        if let Some(first) = points.next() {
            path.move_to(first);
        }
        for point in points {
            path.line_to(point);
        }
    }

    piece.clear();
}

#[cfg(test)]
mod tests {
    use symbolmap_types::cartesian::Size;
    use symbolmap_types::impls::{ClosedContour, Contour as OwnedContour, MultiContour as OwnedMultiContour};
    use symbolmap_types::impls::{MultiPolygon as OwnedMultiPolygon, Polygon as OwnedPolygon};
    use symbolmap_types::lonlat;

    use super::*;
    use crate::projector::ProjectionKind;

    // 1 degree = 1 pixel, (0, 0) at the viewport center.
    fn plate_carree() -> GeoProjector {
        GeoProjector::fit(
            ProjectionKind::Equirectangular,
            lonlat!(0.0, 0.0),
            Size::new(360.0, 180.0),
            0.0,
        )
    }

    fn natural_earth() -> GeoProjector {
        GeoProjector::fit(
            ProjectionKind::NaturalEarth,
            lonlat!(0.0, 0.0),
            Size::new(960.0, 500.0),
            0.0,
        )
    }

    fn triangle() -> OwnedPolygon<GeoPoint2d> {
        OwnedPolygon::from(vec![lonlat!(0.0, 0.0), lonlat!(90.0, 0.0), lonlat!(90.0, 45.0)])
    }

    #[test]
    fn polygon_becomes_closed_subpath() {
        let projector = plate_carree();
        let path = PathBuilder::new(&projector).build(&Geom::Polygon(triangle()));

        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.subpath_count(), 1);
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(path.to_svg_data(), "M180,90L270,90L270,45Z");
    }

    #[test]
    fn building_is_stable() {
        let projector = natural_earth();
        let geometry = Geom::MultiPolygon(OwnedMultiPolygon::from(vec![triangle(), triangle()]));

        let first = PathBuilder::new(&projector).build(&geometry);
        let second = PathBuilder::new(&projector).build(&geometry);
        assert_eq!(first, second);
        assert_eq!(first.to_svg_data(), second.to_svg_data());

        let other_projector = natural_earth();
        assert_eq!(PathBuilder::new(&other_projector).build(&geometry), first);
    }

    #[test]
    fn invalid_vertices_are_skipped() {
        let projector = plate_carree();
        let polygon = OwnedPolygon::from(vec![
            lonlat!(0.0, 0.0),
            lonlat!(f64::NAN, 10.0),
            lonlat!(90.0, 0.0),
            lonlat!(90.0, 45.0),
        ]);
        let path = PathBuilder::new(&projector).build_polygon(&polygon);
        assert_eq!(path.to_svg_data(), "M180,90L270,90L270,45Z");
    }

    #[test]
    fn degenerate_rings_are_dropped() {
        let projector = plate_carree();
        let hole = ClosedContour::new(vec![lonlat!(10.0, 5.0), lonlat!(20.0, 5.0), lonlat!(20.0, 10.0)]);

        let broken_outer = OwnedPolygon::new(
            ClosedContour::new(vec![lonlat!(0.0, 0.0), lonlat!(300.0, 0.0), lonlat!(0.0, 95.0)]),
            vec![hole.clone()],
        );
        assert!(PathBuilder::new(&projector).build_polygon(&broken_outer).is_empty());

        let broken_hole = OwnedPolygon::new(
            triangle().outer_contour,
            vec![ClosedContour::new(vec![lonlat!(10.0, 5.0), lonlat!(20.0, 5.0)]), hole],
        );
        let path = PathBuilder::new(&projector).build_polygon(&broken_hole);
        assert_eq!(path.subpath_count(), 2);
    }

    #[test]
    fn multipolygon_has_subpath_per_ring() {
        let projector = natural_earth();
        let with_hole = OwnedPolygon::new(
            ClosedContour::new(vec![lonlat!(0.0, 0.0), lonlat!(40.0, 0.0), lonlat!(40.0, 40.0), lonlat!(0.0, 40.0)]),
            vec![ClosedContour::new(vec![lonlat!(10.0, 10.0), lonlat!(20.0, 10.0), lonlat!(20.0, 20.0)])],
        );
        let geometry = Geom::MultiPolygon(OwnedMultiPolygon::from(vec![with_hole, triangle()]));

        let path = PathBuilder::new(&projector).build(&geometry);
        assert_eq!(path.subpath_count(), 3);
        assert_eq!(
            path.commands().iter().filter(|c| **c == PathCommand::Close).count(),
            3
        );
    }

    #[test]
    fn mesh_lines_stay_open() {
        let projector = plate_carree();
        let mesh = OwnedMultiContour::from(vec![
            OwnedContour::open(vec![lonlat!(0.0, 0.0), lonlat!(10.0, 0.0), lonlat!(10.0, 10.0)]),
            OwnedContour::open(vec![lonlat!(-10.0, 0.0), lonlat!(-20.0, 0.0)]),
            OwnedContour::open(vec![lonlat!(5.0, 5.0)]),
        ]);

        let path = PathBuilder::new(&projector).build(&Geom::MultiContour(mesh));
        assert_eq!(path.to_svg_data(), "M180,90L190,90L190,80M170,90L160,90");
    }

    #[test]
    fn lines_are_split_at_the_seam() {
        let projector = plate_carree();
        let line = OwnedContour::open(vec![
            lonlat!(170.0, 0.0),
            lonlat!(179.0, 0.0),
            lonlat!(-179.0, 0.0),
            lonlat!(-170.0, 0.0),
        ]);

        let path = PathBuilder::new(&projector).build_contour(&line);
        assert_eq!(path.subpath_count(), 2);
        assert_eq!(path.to_svg_data(), "M350,90L359,90M1,90L10,90");
    }

    #[test]
    fn geo_types_geometries_are_supported() {
        let projector = plate_carree();
        use geo_types::polygon;
        let polygon = polygon![(x: 0.0, y: 0.0), (x: 90.0, y: 0.0), (x: 90.0, y: 45.0)];
        let path = PathBuilder::new(&projector).build_polygon(&polygon);
        assert_eq!(path.to_svg_data(), "M180,90L270,90L270,45Z");
    }

    #[test]
    fn coordinates_are_formatted_compactly() {
        assert_eq!(format_coord(1.0), "1");
        assert_eq!(format_coord(-0.0001), "0");
        assert_eq!(format_coord(12.3456), "12.346");
        assert_eq!(format_coord(-7.5), "-7.5");
    }
}
