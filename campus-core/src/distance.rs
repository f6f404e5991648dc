//! Great-circle distance between two latitude/longitude pairs.

use geo::Coord;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometre to statute mile conversion factor.
pub const MILES_PER_KM: f64 = 0.621_371_192_2;

/// Decimal places used when a distance in miles is shown to a user.
pub const DISTANCE_DECIMALS: usize = 4;

/// Distance in miles between `(lat1, lon1)` and `(lat2, lon2)`.
///
/// Latitudes are positive north of the equator and longitudes positive east
/// of Greenwich. Inputs outside the usual ranges produce meaningless but
/// finite results.
///
/// # Examples
/// ```
/// use campus_core::distance_miles;
///
/// // Chicago to Evanston.
/// let miles = distance_miles(41.88, -87.63, 42.05, -87.68);
/// assert!((11.0..13.0).contains(&miles));
/// assert_eq!(distance_miles(41.88, -87.63, 41.88, -87.63), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula is floating-point maths"
)]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();

    let a = half_lat * half_lat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_lon * half_lon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * MILES_PER_KM
}

/// Distance in miles between two coordinates (`x = longitude`, `y = latitude`).
#[must_use]
pub fn distance_between(from: Coord<f64>, to: Coord<f64>) -> f64 {
    distance_miles(from.y, from.x, to.y, to.x)
}
