//! Geometry trait implementations for the `geo-types` crate. `geo-types` coordinates are read as `x = longitude`,
//! `y = latitude`.

use geo_types::{coord, Coord, CoordFloat, CoordNum, LineString, MultiLineString, MultiPolygon, Polygon};

use crate::geo::{GeoPoint, NewGeoPoint};

impl<T: CoordFloat> GeoPoint for Coord<T> {
    type Num = T;

    fn lat(&self) -> Self::Num {
        self.y
    }

    fn lon(&self) -> Self::Num {
        self.x
    }
}

impl<T: CoordFloat> NewGeoPoint<T> for Coord<T> {
    fn latlon(lat: T, lon: T) -> Self {
        coord!(x: lon, y: lat)
    }
}

impl<T: CoordNum> crate::contour::Contour for LineString<T> {
    type Point = Coord<T>;

    fn is_closed(&self) -> bool {
        LineString::is_closed(self)
    }

    fn iter_points(&self) -> impl Iterator<Item = &'_ Self::Point> {
        if LineString::is_closed(self) {
            self.0[..(self.0.len().max(1) - 1)].iter()
        } else {
            self.0.iter()
        }
    }
}

impl<T: CoordNum> crate::polygon::Polygon for Polygon<T> {
    type Contour = LineString<T>;

    fn outer_contour(&self) -> &Self::Contour {
        self.exterior()
    }

    fn inner_contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        self.interiors().iter()
    }
}

impl<T: CoordNum> crate::multi_polygon::MultiPolygon for MultiPolygon<T> {
    type Polygon = Polygon<T>;

    fn polygons(&self) -> impl Iterator<Item = &'_ Self::Polygon> {
        self.0.iter()
    }
}

impl<T: CoordNum> crate::multi_contour::MultiContour for MultiLineString<T> {
    type Contour = LineString<T>;

    fn contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        self.0.iter()
    }
}
