//! Sequential ETA chaining.
//!
//! One shuttle serves requests in submission order, so a new ride's
//! pickup must account for travel from wherever the shuttle ends its
//! previous ride. The scheduler reads the queue tail, asks the
//! travel-time oracle for the legs it needs, and derives pickup, travel,
//! and dropoff times. A failed oracle call aborts the whole attempt;
//! nothing is ever scheduled from a partial answer.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::warn;

use crate::clock::Clock;
use crate::config::SchedulerConfig;
use crate::geo::Coordinate;
use crate::matrix::{DurationMatrix, OracleError, TravelTimeOracle};
use crate::ride::Ride;

/// A student's point-to-point ride ask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideRequest {
    /// Riders in the party. The shuttle seats 8; the request-handling
    /// layer validates the 1..=8 range before asks reach the core.
    pub passengers: u32,
    pub pickup: Coordinate,
    pub dropoff: Coordinate,
}

impl RideRequest {
    pub fn new(passengers: u32, pickup: Coordinate, dropoff: Coordinate) -> Self {
        Self {
            passengers,
            pickup,
            dropoff,
        }
    }
}

/// Computed pickup/travel/dropoff times for one ride. Immutable once
/// computed; persisted as part of the ride record.
#[derive(Debug, Clone, PartialEq)]
pub struct RideSchedule {
    pub pickup_time: DateTime<Utc>,
    /// Pickup-to-dropoff leg in seconds, as reported by the oracle.
    pub travel_time_secs: i64,
    pub dropoff_time: DateTime<Utc>,
    /// Street addresses echoed by the matrix service, when it resolves
    /// them.
    pub pickup_address: Option<String>,
    pub dropoff_address: Option<String>,
}

/// The scheduler's single failure signal.
///
/// Transport failures and contract violations both collapse into this
/// one condition; the caller must never persist a ride built from a
/// partially-trustworthy matrix. The underlying cause stays reachable
/// through `source()` for logs.
#[derive(Debug, Error)]
#[error("unable to compute ride schedule")]
pub struct ScheduleError {
    #[from]
    source: OracleError,
}

/// Chains new requests onto the tail of the ride queue.
///
/// Collaborators are injected at construction; the scheduler itself holds
/// no mutable state and one instance serves the whole process.
pub struct RideScheduler {
    oracle: Box<dyn TravelTimeOracle>,
    clock: Box<dyn Clock>,
    config: SchedulerConfig,
}

impl RideScheduler {
    pub fn new(
        oracle: Box<dyn TravelTimeOracle>,
        clock: Box<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            oracle,
            clock,
            config,
        }
    }

    /// Compute the schedule for `request` chained after `tail`.
    ///
    /// With an empty queue the shuttle is assumed to reach the pickup
    /// within the configured arrival offset. Otherwise both legs
    /// (tail dropoff -> pickup, pickup -> dropoff) are fetched in one
    /// aligned two-leg call and read off the reply's diagonal.
    pub fn schedule(
        &self,
        tail: Option<&Ride>,
        request: &RideRequest,
    ) -> Result<RideSchedule, ScheduleError> {
        match tail {
            None => self.schedule_first(request),
            Some(last) => self.schedule_chained(last, request),
        }
    }

    fn schedule_first(&self, request: &RideRequest) -> Result<RideSchedule, ScheduleError> {
        let matrix = self.query(&[request.pickup], &[request.dropoff])?;
        let travel_time_secs = leg(&matrix, 0, 0)?;

        let pickup_time =
            self.clock.now() + Duration::seconds(self.config.arrival_offset_secs);
        Ok(RideSchedule {
            pickup_time,
            travel_time_secs,
            dropoff_time: pickup_time + Duration::seconds(travel_time_secs),
            pickup_address: matrix.origin_address(0).map(str::to_owned),
            dropoff_address: matrix.destination_address(0).map(str::to_owned),
        })
    }

    fn schedule_chained(
        &self,
        last: &Ride,
        request: &RideRequest,
    ) -> Result<RideSchedule, ScheduleError> {
        let start = last.dropoff;
        let matrix = self.query(
            &[start, request.pickup],
            &[request.pickup, request.dropoff],
        )?;

        // Aligned two-leg call: row i pairs origins[i] with
        // destinations[i], so the legs we asked for sit on the diagonal.
        let approach_secs = leg(&matrix, 0, 0)?;
        let travel_time_secs = leg(&matrix, 1, 1)?;

        let pickup_time = last.schedule.dropoff_time + Duration::seconds(approach_secs);
        Ok(RideSchedule {
            pickup_time,
            travel_time_secs,
            dropoff_time: pickup_time + Duration::seconds(travel_time_secs),
            pickup_address: matrix.origin_address(1).map(str::to_owned),
            dropoff_address: matrix.destination_address(1).map(str::to_owned),
        })
    }

    fn query(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DurationMatrix, ScheduleError> {
        self.oracle
            .travel_times(origins, destinations)
            .map_err(|err| {
                warn!(error = %err, "scheduling aborted: travel-time query failed");
                ScheduleError::from(err)
            })
    }
}

fn leg(matrix: &DurationMatrix, row: usize, col: usize) -> Result<i64, ScheduleError> {
    matrix.leg_secs(row, col).ok_or_else(|| {
        ScheduleError::from(OracleError::Malformed(format!("missing leg {row},{col}")))
    })
}
