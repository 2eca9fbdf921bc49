//! Travel-time oracle: the external distance-matrix service behind a
//! pluggable trait.
//!
//! - [`TravelTimeOracle`]: the seam the scheduler talks to.
//! - [`MatrixApiClient`]: blocking HTTP implementation.
//! - [`DurationMatrix`]: a fully-validated reply. It either exists as a
//!   complete rectangle of durations or not at all; partial replies are
//!   rejected at the boundary.

mod client;
mod error;
mod parser;
mod response;


pub use client::MatrixApiClient;
pub use error::OracleError;

use crate::geo::Coordinate;

/// A validated m x n rectangle of travel durations, one row per origin and
/// one column per destination, plus the street addresses the service
/// resolved for each coordinate (when it did).
#[derive(Debug, Clone, PartialEq)]
pub struct DurationMatrix {
    durations: Vec<Vec<i64>>,
    origin_addresses: Vec<String>,
    destination_addresses: Vec<String>,
}

impl DurationMatrix {
    /// Assemble a matrix from already-validated rows. Useful for fixture
    /// oracles and non-HTTP backends.
    pub fn from_rows(durations: Vec<Vec<i64>>) -> Self {
        Self {
            durations,
            origin_addresses: Vec::new(),
            destination_addresses: Vec::new(),
        }
    }

    /// Attach resolved address echoes to a matrix built with
    /// [`DurationMatrix::from_rows`].
    pub fn with_addresses(
        mut self,
        origin_addresses: Vec<String>,
        destination_addresses: Vec<String>,
    ) -> Self {
        self.origin_addresses = origin_addresses;
        self.destination_addresses = destination_addresses;
        self
    }

    /// Seconds for the leg `origins[row] -> destinations[col]`.
    pub fn leg_secs(&self, row: usize, col: usize) -> Option<i64> {
        self.durations.get(row)?.get(col).copied()
    }

    pub fn origin_address(&self, idx: usize) -> Option<&str> {
        self.origin_addresses.get(idx).map(String::as_str)
    }

    pub fn destination_address(&self, idx: usize) -> Option<&str> {
        self.destination_addresses.get(idx).map(String::as_str)
    }

    /// Number of origin rows.
    pub fn rows(&self) -> usize {
        self.durations.len()
    }
}

/// Travel-time backend. One call fetches the full `origins` x
/// `destinations` rectangle of leg durations.
///
/// Implementations fail closed: any transport failure or contract
/// violation is an error and no partial matrix is ever returned. No
/// retries happen at this seam; the caller decides whether to retry a
/// whole scheduling attempt.
pub trait TravelTimeOracle: Send + Sync {
    fn travel_times(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DurationMatrix, OracleError>;
}
