//! Geographic coordinates and the distance oracle used for edge weights and
//! heuristic estimates.

use serde::Serialize;

use crate::error::{Error, Result};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and inside their valid ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(Error::DistanceOracle {
                message: format!(
                    "non-finite coordinates ({}, {})",
                    self.latitude, self.longitude
                ),
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::DistanceOracle {
                message: format!("latitude {} outside [-90, 90]", self.latitude),
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::DistanceOracle {
                message: format!("longitude {} outside [-180, 180]", self.longitude),
            });
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Source of distances between two coordinates, in miles.
///
/// Implementations must be pure: the same pair always yields the same value.
/// The heuristic table relies on this to stay idempotent.
pub trait DistanceOracle: Send + Sync {
    fn distance_miles(&self, from: &Coordinates, to: &Coordinates) -> Result<f64>;
}

/// Great-circle distance on a spherical Earth (haversine formula).
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl DistanceOracle for GreatCircle {
    fn distance_miles(&self, from: &Coordinates, to: &Coordinates) -> Result<f64> {
        from.validate()?;
        to.validate()?;
        Ok(haversine_miles(from, to))
    }
}

/// Haversine distance without range validation.
pub fn haversine_miles(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}

/// Convenience wrapper around [`GreatCircle`].
pub fn geodesic_miles(from: &Coordinates, to: &Coordinates) -> Result<f64> {
    GreatCircle.distance_miles(from, to)
}
