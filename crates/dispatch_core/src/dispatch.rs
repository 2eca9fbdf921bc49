//! One hail, end to end: chain the schedule, classify the endpoints,
//! append to the queue.

use tracing::info;

use crate::geo::Coordinate;
use crate::geofence::CampusBoundary;
use crate::ride::{Ride, RideQueue};
use crate::scheduling::{RideRequest, RideScheduler, ScheduleError};

/// Entry point the request-handling layer drives. Owns the scheduler,
/// the campus boundary, and the queue; everything is wired explicitly at
/// construction.
pub struct Dispatcher<Q: RideQueue> {
    scheduler: RideScheduler,
    boundary: CampusBoundary,
    queue: Q,
}

impl<Q: RideQueue> Dispatcher<Q> {
    pub fn new(scheduler: RideScheduler, boundary: CampusBoundary, queue: Q) -> Self {
        Self {
            scheduler,
            boundary,
            queue,
        }
    }

    /// Schedule `request` after the current queue tail and persist the
    /// resulting ride. Nothing is appended when scheduling fails.
    pub fn hail(&self, request: RideRequest) -> Result<Ride, ScheduleError> {
        let ride = self.queue.append_after_tail(|tail, id| {
            let schedule = self.scheduler.schedule(tail, &request)?;
            let on_campus = self.boundary.contains(request.pickup)
                && self.boundary.contains(request.dropoff);
            Ok(Ride {
                id,
                passengers: request.passengers,
                pickup: request.pickup,
                dropoff: request.dropoff,
                schedule,
                on_campus,
            })
        })?;

        info!(
            ride_id = ride.id,
            pickup_time = %ride.schedule.pickup_time,
            on_campus = ride.on_campus,
            "ride appended to chain"
        );
        Ok(ride)
    }

    /// Classify a single coordinate against the campus boundary.
    pub fn is_on_campus(&self, point: Coordinate) -> bool {
        self.boundary.contains(point)
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }
}
