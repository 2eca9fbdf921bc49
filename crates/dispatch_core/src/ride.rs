use std::sync::Mutex;

use crate::geo::Coordinate;
use crate::scheduling::{RideSchedule, ScheduleError};

/// A persisted ride in the shuttle's queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    /// Assigned in submission order, never reused.
    pub id: u64,
    pub passengers: u32,
    pub pickup: Coordinate,
    pub dropoff: Coordinate,
    pub schedule: RideSchedule,
    /// Whether both endpoints fall inside the campus boundary.
    pub on_campus: bool,
}

/// Ordered ride persistence.
///
/// The schedule chain is linear: only the tail anchors the next
/// computation. Implementations must serialize [`RideQueue::append_after_tail`]
/// so the closure's observed tail is still the tail at append time;
/// without that guarantee two concurrent hails could both chain off the
/// same ride and branch the schedule.
pub trait RideQueue: Send + Sync {
    /// The most recently appended ride, if any.
    fn last_ride(&self) -> Option<Ride>;

    /// Read the tail, build the next ride, and append it as one
    /// serialized step. `build` receives the current tail and the id the
    /// new ride will carry; returning an error appends nothing.
    fn append_after_tail<F>(&self, build: F) -> Result<Ride, ScheduleError>
    where
        F: FnOnce(Option<&Ride>, u64) -> Result<Ride, ScheduleError>;

    /// Snapshot of the queue in submission order.
    fn rides(&self) -> Vec<Ride>;

    /// Drop every queued ride. Ids are not reused afterwards.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct QueueState {
    rides: Vec<Ride>,
    next_id: u64,
}

/// Reference queue: one mutex over the ride list, held across the whole
/// read-tail/build/append step. Also the serialization test double for
/// database-backed collaborators.
#[derive(Debug)]
pub struct InMemoryRideQueue {
    state: Mutex<QueueState>,
}

impl InMemoryRideQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                rides: Vec::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.state.lock().expect("ride queue mutex poisoned")
    }
}

impl Default for InMemoryRideQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RideQueue for InMemoryRideQueue {
    fn last_ride(&self) -> Option<Ride> {
        self.lock().rides.last().cloned()
    }

    fn append_after_tail<F>(&self, build: F) -> Result<Ride, ScheduleError>
    where
        F: FnOnce(Option<&Ride>, u64) -> Result<Ride, ScheduleError>,
    {
        let mut state = self.lock();
        let ride = build(state.rides.last(), state.next_id)?;
        state.next_id += 1;
        state.rides.push(ride.clone());
        Ok(ride)
    }

    fn rides(&self) -> Vec<Ride> {
        self.lock().rides.clone()
    }

    fn clear(&self) {
        self.lock().rides.clear();
    }
}
