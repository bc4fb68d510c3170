//! Drive the service through a seeded shift and print the outcome counters.
//!
//! Run with: cargo run -p dispatch_core --example scenario_run

use dispatch_core::{DispatchConfig, DispatchService, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_DRIVERS: usize = 20;
const ROUNDS: usize = 50;
const CITY_SIZE: f64 = 10.0;

fn random_point(rng: &mut StdRng) -> Point {
    Point::new(rng.gen_range(0.0..CITY_SIZE), rng.gen_range(0.0..CITY_SIZE))
}

fn main() {
    let mut rng = StdRng::seed_from_u64(123);
    let mut service = DispatchService::new(DispatchConfig::legacy_limits());

    for i in 0..NUM_DRIVERS {
        let rating = rng.gen_range(3.5..5.0);
        let location = random_point(&mut rng);
        service
            .register_driver(format!("driver-{i}"), rating, location)
            .expect("legacy bound fits the fleet");
    }

    let mut rejected_requests = 0;
    let mut next_rider = 0;
    for _ in 0..ROUNDS {
        for _ in 0..rng.gen_range(0..4) {
            let pickup = random_point(&mut rng);
            let dropoff = random_point(&mut rng);
            if service
                .request_ride(format!("rider-{next_rider}"), pickup, dropoff)
                .is_err()
            {
                rejected_requests += 1;
            }
            next_rider += 1;
        }

        // Drain until the queue is empty, no driver is free, or the ledger is full.
        while service.dispatch().is_ok() {}

        let busy: Vec<_> = service
            .drivers()
            .into_iter()
            .filter(|driver| !driver.available)
            .map(|driver| driver.id)
            .collect();
        for driver in busy {
            if rng.gen_bool(0.4) {
                let _ = service.complete_ride(driver);
            }
        }
    }

    let stats = service.stats();
    println!("--- Scenario run ({NUM_DRIVERS} drivers, {ROUNDS} rounds) ---");
    println!("Ride requests: {next_rider} ({rejected_requests} rejected)");
    println!("Dispatched: {}", stats.dispatched);
    println!("Completed: {}", stats.completed);
    println!("Still waiting: {}", service.waiting_riders().len());
    println!(
        "Dispatch attempts without drivers: {}",
        stats.no_drivers_available
    );
    if let Some(mean) = stats.mean_completed_pickup_distance {
        println!("Mean pickup distance (completed): {mean:.2}");
    }
    if stats.capacity_rejections > 0 {
        let rides = service.rides().len();
        println!("Stopped by ride ledger bound after {rides} rides");
    }
}
