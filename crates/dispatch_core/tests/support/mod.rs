#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{DateTime, TimeZone, Utc};
use dispatch_core::clock::ManualClock;
use dispatch_core::config::SchedulerConfig;
use dispatch_core::dispatch::Dispatcher;
use dispatch_core::geo::Coordinate;
use dispatch_core::geofence::CampusBoundary;
use dispatch_core::matrix::{DurationMatrix, OracleError, TravelTimeOracle};
use dispatch_core::ride::{InMemoryRideQueue, Ride};
use dispatch_core::scheduling::{RideRequest, RideSchedule, RideScheduler};

/// Stadium Drive pickup used across the scheduling tests.
pub fn stadium_pickup() -> Coordinate {
    Coordinate::new(37.273485, -76.719628)
}

/// Richmond Road dropoff.
pub fn richmond_dropoff() -> Coordinate {
    Coordinate::new(37.280893, -76.719691)
}

/// Where the previous ride leaves the shuttle.
pub fn brooks_street() -> Coordinate {
    Coordinate::new(37.272042, -76.714027)
}

/// A dropoff well clear of the campus boundary.
pub fn offsite_dropoff() -> Coordinate {
    Coordinate::new(37.300000, -76.750000)
}

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 4, 4, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub fn request_between(pickup: Coordinate, dropoff: Coordinate) -> RideRequest {
    RideRequest::new(2, pickup, dropoff)
}

enum CannedReply {
    Matrix(DurationMatrix),
    Failure(&'static str),
}

/// Oracle that replays canned replies in call order and records every
/// query it receives. Hand a clone of the [`Arc`] to the scheduler and
/// keep one to inspect calls afterwards.
pub struct ScriptedOracle {
    replies: Mutex<VecDeque<CannedReply>>,
    calls: Mutex<Vec<(Vec<Coordinate>, Vec<Coordinate>)>>,
}

impl ScriptedOracle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn push_matrix(self: Arc<Self>, rows: Vec<Vec<i64>>) -> Arc<Self> {
        self.replies
            .lock()
            .expect("replies mutex")
            .push_back(CannedReply::Matrix(DurationMatrix::from_rows(rows)));
        self
    }

    pub fn push_matrix_with_addresses(
        self: Arc<Self>,
        rows: Vec<Vec<i64>>,
        origins: &[&str],
        destinations: &[&str],
    ) -> Arc<Self> {
        let matrix = DurationMatrix::from_rows(rows).with_addresses(
            origins.iter().map(|s| s.to_string()).collect(),
            destinations.iter().map(|s| s.to_string()).collect(),
        );
        self.replies
            .lock()
            .expect("replies mutex")
            .push_back(CannedReply::Matrix(matrix));
        self
    }

    pub fn push_failure(self: Arc<Self>, reason: &'static str) -> Arc<Self> {
        self.replies
            .lock()
            .expect("replies mutex")
            .push_back(CannedReply::Failure(reason));
        self
    }

    /// Every `(origins, destinations)` query seen so far.
    pub fn calls(&self) -> Vec<(Vec<Coordinate>, Vec<Coordinate>)> {
        self.calls.lock().expect("calls mutex").clone()
    }
}

/// Boxable handle so a scripted oracle can be shared between the
/// scheduler and the test body.
pub struct OracleHandle(pub Arc<ScriptedOracle>);

impl TravelTimeOracle for OracleHandle {
    fn travel_times(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DurationMatrix, OracleError> {
        self.0
            .calls
            .lock()
            .expect("calls mutex")
            .push((origins.to_vec(), destinations.to_vec()));
        match self.0.replies.lock().expect("replies mutex").pop_front() {
            Some(CannedReply::Matrix(matrix)) => Ok(matrix),
            Some(CannedReply::Failure(reason)) => {
                Err(OracleError::Malformed(reason.to_string()))
            }
            None => Err(OracleError::Malformed("scripted oracle exhausted".into())),
        }
    }
}

/// Oracle that answers every leg with the same duration. An optional
/// delay widens race windows in concurrency tests.
pub struct StaticOracle {
    pub secs_per_leg: i64,
    pub delay: Option<StdDuration>,
}

impl StaticOracle {
    pub fn new(secs_per_leg: i64) -> Self {
        Self {
            secs_per_leg,
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: StdDuration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl TravelTimeOracle for StaticOracle {
    fn travel_times(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DurationMatrix, OracleError> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        let rows = origins
            .iter()
            .map(|_| vec![self.secs_per_leg; destinations.len()])
            .collect();
        Ok(DurationMatrix::from_rows(rows))
    }
}

/// Scheduler with a pinned clock and default config around the given
/// oracle.
pub fn scheduler_with(oracle: Box<dyn TravelTimeOracle>, now: DateTime<Utc>) -> RideScheduler {
    RideScheduler::new(oracle, Box::new(ManualClock::at(now)), SchedulerConfig::default())
}

/// Dispatcher over the bundled campus boundary and a fresh in-memory
/// queue.
pub fn dispatcher_with(
    oracle: Box<dyn TravelTimeOracle>,
    now: DateTime<Utc>,
) -> Dispatcher<InMemoryRideQueue> {
    Dispatcher::new(
        scheduler_with(oracle, now),
        CampusBoundary::bundled(),
        InMemoryRideQueue::new(),
    )
}

/// A ride already in the queue, ending at `dropoff` at `dropoff_time`.
pub fn ride_ending_at(id: u64, dropoff: Coordinate, dropoff_time: DateTime<Utc>) -> Ride {
    Ride {
        id,
        passengers: 1,
        pickup: stadium_pickup(),
        dropoff,
        schedule: RideSchedule {
            pickup_time: dropoff_time - chrono::Duration::seconds(300),
            travel_time_secs: 300,
            dropoff_time,
            pickup_address: None,
            dropoff_address: None,
        },
        on_campus: true,
    }
}

/// Materialize a schedule into a ride record, for chaining further
/// requests in tests that bypass the queue.
pub fn ride_from(id: u64, request: &RideRequest, schedule: RideSchedule) -> Ride {
    Ride {
        id,
        passengers: request.passengers,
        pickup: request.pickup,
        dropoff: request.dropoff,
        schedule,
        on_campus: true,
    }
}
