//! Geographic coordinate type.

use std::fmt;

use geo::Point;

/// Error returned when a latitude/longitude pair is not a usable coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

impl InvalidCoordinate {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A WGS84 coordinate in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// This type guarantees that any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use departures_server::domain::Coordinate;
///
/// let tallinn = Coordinate::new(59.4370, 24.7536).unwrap();
/// assert_eq!(tallinn.latitude(), 59.4370);
///
/// // Out of range is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, -180.5).is_err());
///
/// // Free text "lat,lon" is accepted
/// let parsed = Coordinate::parse("59.4370, 24.7536").unwrap();
/// assert_eq!(parsed, tallinn);
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating both ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate::new("must be finite numbers"));
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::new("latitude must be within [-90, 90]"));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate::new(
                "longitude must be within [-180, 180]",
            ));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a coordinate from two comma-separated decimal numbers.
    ///
    /// Surrounding whitespace around either number is ignored.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinate> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(InvalidCoordinate::new(
                "expected two comma-separated numbers",
            ));
        };

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidCoordinate::new("latitude is not a number"))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidCoordinate::new("longitude is not a number"))?;

        Self::new(latitude, longitude)
    }

    /// Returns the latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the coordinate as a `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}
