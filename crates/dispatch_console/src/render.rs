//! Text and JSON renderings of listings and outcomes.

use std::io::{self, Write};

use dispatch_core::{DispatchStats, DriverRecord, Ride, RideAssignment, Rider};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn driver_line(driver: &DriverRecord) -> String {
    let status = if driver.available {
        "Available"
    } else {
        "Busy"
    };
    format!(
        "Driver {} - {} (rating {:.1}) {status}",
        driver.id, driver.name, driver.rating
    )
}

pub fn rider_line(rider: &Rider) -> String {
    format!(
        "Rider {} - {} pickup({:.1},{:.1}) dropoff({:.1},{:.1})",
        rider.id, rider.name, rider.pickup.x, rider.pickup.y, rider.dropoff.x, rider.dropoff.y
    )
}

pub fn ride_line(ride: &Ride) -> String {
    format!(
        "Ride {} rider={} driver={} dist={:.2} status={}",
        ride.id, ride.rider, ride.driver, ride.pickup_distance, ride.status
    )
}

pub fn assignment_line(assignment: &RideAssignment) -> String {
    format!(
        "Driver {} assigned to Rider {} (dist={:.2})",
        assignment.driver_name, assignment.rider.name, assignment.pickup_distance
    )
}

pub fn stats_line(stats: &DispatchStats) -> String {
    let mean = stats
        .mean_completed_pickup_distance
        .map(|d| format!("{d:.2}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Dispatched {} | completed {} | no riders {} | no drivers {} | capacity {} | \
         failed completions {} | mean pickup dist {}",
        stats.dispatched,
        stats.completed,
        stats.no_riders_waiting,
        stats.no_drivers_available,
        stats.capacity_rejections,
        stats.completion_failures,
        mean
    )
}

/// Write `items` one per line in the chosen format.
pub fn write_listing<W, T>(
    out: &mut W,
    format: OutputFormat,
    items: &[T],
    text: impl Fn(&T) -> String,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    for item in items {
        match format {
            OutputFormat::Text => writeln!(out, "{}", text(item))?,
            OutputFormat::Json => {
                let line = serde_json::to_string(item).map_err(io::Error::other)?;
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}
