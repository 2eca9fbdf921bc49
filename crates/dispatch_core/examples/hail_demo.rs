//! Hail three rides against a fixture travel-time oracle and print the
//! resulting schedule chain.
//!
//! Run with: cargo run -p dispatch_core --example hail_demo

use dispatch_core::clock::SystemClock;
use dispatch_core::config::SchedulerConfig;
use dispatch_core::dispatch::Dispatcher;
use dispatch_core::geo::Coordinate;
use dispatch_core::geofence::CampusBoundary;
use dispatch_core::matrix::{DurationMatrix, OracleError, TravelTimeOracle};
use dispatch_core::ride::{InMemoryRideQueue, RideQueue};
use dispatch_core::scheduling::{RideRequest, RideScheduler};

/// Stands in for the matrix service: three minutes per leg, every time.
struct FixtureOracle;

impl TravelTimeOracle for FixtureOracle {
    fn travel_times(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DurationMatrix, OracleError> {
        let rows = origins
            .iter()
            .map(|_| vec![180; destinations.len()])
            .collect();
        Ok(DurationMatrix::from_rows(rows))
    }
}

fn main() {
    let dispatcher = Dispatcher::new(
        RideScheduler::new(
            Box::new(FixtureOracle),
            Box::new(SystemClock),
            SchedulerConfig::default(),
        ),
        CampusBoundary::bundled(),
        InMemoryRideQueue::new(),
    );

    let stops = [
        ("stadium -> brooks", (37.273485, -76.719628), (37.272042, -76.714027)),
        ("brooks -> richmond", (37.272042, -76.714027), (37.280893, -76.719691)),
        ("richmond -> offsite", (37.280893, -76.719691), (37.300000, -76.750000)),
    ];

    for (label, (p_lat, p_lng), (d_lat, d_lng)) in stops {
        let request = RideRequest::new(
            2,
            Coordinate::new(p_lat, p_lng),
            Coordinate::new(d_lat, d_lng),
        );
        match dispatcher.hail(request) {
            Ok(ride) => println!(
                "hailed {:<20} ride #{} pickup {} dropoff {} on_campus={}",
                label,
                ride.id,
                ride.schedule.pickup_time.format("%H:%M:%S"),
                ride.schedule.dropoff_time.format("%H:%M:%S"),
                ride.on_campus,
            ),
            Err(err) => println!("hail {label} failed: {err}"),
        }
    }

    println!("\n--- queue ({} rides) ---", dispatcher.queue().rides().len());
    for ride in dispatcher.queue().rides() {
        println!(
            "  #{} travel {:>4}s  {} -> {}",
            ride.id,
            ride.schedule.travel_time_secs,
            ride.schedule.pickup_time.format("%H:%M:%S"),
            ride.schedule.dropoff_time.format("%H:%M:%S"),
        );
    }
}
