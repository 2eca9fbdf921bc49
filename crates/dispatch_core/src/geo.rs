use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair.
///
/// No range validation is applied: the travel-time service treats `(0, 0)`
/// as its own "bad location" sentinel and reports it through per-element
/// statuses, which the matrix parser rejects wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Formats as `lat,lng` with six decimal places, the precision the
/// travel-time service expects in its query parameters.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}
