use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::error::SymbolmapTypesError;

/// A point on the surface of the Earth given by its longitude and latitude in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lon(&self) -> Self::Num;

    /// Latitude in radians.
    fn lat_rad(&self) -> Self::Num {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> Self::Num {
        self.lon().to_radians()
    }

    /// Returns true if both coordinates are finite, longitude is in `[-180, 180]` and latitude is in `[-90, 90]`.
    fn is_valid(&self) -> bool {
        let lon = self.lon();
        let lat = self.lat();
        let (Some(max_lon), Some(max_lat)) = (
            <Self::Num as NumCast>::from(180.0),
            <Self::Num as NumCast>::from(90.0),
        ) else {
            return false;
        };

        lon.is_finite() && lat.is_finite() && lon.abs() <= max_lon && lat.abs() <= max_lat
    }
}

/// Geographic point that can be constructed from coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude (in this order).
    fn latlon(lat: N, lon: N) -> Self;

    /// Creates a point from longitude and latitude (in this order).
    fn lonlat(lon: N, lat: N) -> Self {
        Self::latlon(lat, lon)
    }
}

/// 2d point on the surface of the Earth.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lon: f64,
    lat: f64,
}

impl GeoPoint2d {
    /// Creates a new point from another geographic point.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lon: other.lon(),
            lat: other.lat(),
        }
    }

    /// Creates a new point from longitude and latitude, checking that both are finite and in range.
    ///
    /// ```
    /// use symbolmap_types::geo::GeoPoint2d;
    ///
    /// assert!(GeoPoint2d::validated(-99.13, 19.43).is_ok());
    /// assert!(GeoPoint2d::validated(19.43, -99.13).is_err());
    /// ```
    pub fn validated(lon: f64, lat: f64) -> Result<Self, SymbolmapTypesError> {
        let point = Self { lon, lat };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(SymbolmapTypesError::InvalidCoordinate { lon, lat })
        }
    }
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lon, lat }
    }
}

/// Creates a new [`GeoPoint2d`] from longitude and latitude values (in degrees).
///
/// ```
/// use symbolmap_types::geo::GeoPoint;
/// use symbolmap_types::lonlat;
///
/// let point = lonlat!(52.0, 38.0);
/// assert_eq!(point.lon(), 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! lonlat {
    ($lon:expr, $lat:expr) => {
        <$crate::geo::GeoPoint2d as $crate::geo::NewGeoPoint<f64>>::lonlat($lon, $lat)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_order() {
        let point = GeoPoint2d::lonlat(10.0, 20.0);
        assert_eq!(point.lon(), 10.0);
        assert_eq!(point.lat(), 20.0);
        assert_eq!(point, GeoPoint2d::latlon(20.0, 10.0));
    }

    #[test]
    fn validation() {
        assert!(lonlat!(180.0, -90.0).is_valid());
        assert!(!lonlat!(180.1, 0.0).is_valid());
        assert!(!lonlat!(0.0, 90.5).is_valid());
        assert!(!lonlat!(f64::NAN, 0.0).is_valid());
        assert!(!lonlat!(0.0, f64::INFINITY).is_valid());

        assert_eq!(
            GeoPoint2d::validated(0.0, 91.0),
            Err(SymbolmapTypesError::InvalidCoordinate { lon: 0.0, lat: 91.0 })
        );
    }
}
