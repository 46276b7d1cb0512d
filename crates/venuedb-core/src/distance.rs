//! Conversion between linear distance on the earth's surface and the central
//! angle it subtends.

/// Mean earth radius used for every conversion, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Converts kilometers to radians and back on a sphere of [`EARTH_RADIUS_KM`].
///
/// Inputs are not range-checked: negative or non-finite values come out the
/// other side arithmetically and callers must guard against them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConverter {
    radius_km: f64,
}

impl Default for DistanceConverter {
    fn default() -> Self {
        Self::EARTH
    }
}

impl DistanceConverter {
    pub const EARTH: Self = Self {
        radius_km: EARTH_RADIUS_KM,
    };

    #[must_use]
    pub fn radius_km(self) -> f64 {
        self.radius_km
    }

    /// Kilometers to radians.
    #[must_use]
    pub fn to_angular(self, distance_km: f64) -> f64 {
        distance_km / self.radius_km
    }

    /// Radians to kilometers.
    #[must_use]
    pub fn to_linear(self, angular_distance: f64) -> f64 {
        angular_distance * self.radius_km
    }
}
