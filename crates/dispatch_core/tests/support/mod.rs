#![allow(dead_code)]

use dispatch_core::{DispatchConfig, DispatchService, DriverId, Point, RiderId};

/// Builder for reproducible service fixtures.
#[derive(Clone, Debug, Default)]
pub struct ServiceBuilder {
    config: DispatchConfig,
    drivers: Vec<(String, f64, Point)>,
    riders: Vec<(String, Point, Point)>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_driver(mut self, name: &str, rating: f64, x: f64, y: f64) -> Self {
        self.drivers
            .push((name.to_string(), rating, Point::new(x, y)));
        self
    }

    pub fn with_rider(mut self, name: &str, pickup_x: f64, pickup_y: f64) -> Self {
        self.riders.push((
            name.to_string(),
            Point::new(pickup_x, pickup_y),
            Point::new(pickup_x + 1.0, pickup_y + 1.0),
        ));
        self
    }

    /// Build the service, returning driver and rider ids in insertion order.
    pub fn build(self) -> (DispatchService, Vec<DriverId>, Vec<RiderId>) {
        let mut service = DispatchService::new(self.config);
        let drivers = self
            .drivers
            .into_iter()
            .map(|(name, rating, location)| {
                service
                    .register_driver(name, rating, location)
                    .expect("driver fixture")
            })
            .collect();
        let riders = self
            .riders
            .into_iter()
            .map(|(name, pickup, dropoff)| {
                service
                    .request_ride(name, pickup, dropoff)
                    .expect("rider fixture")
            })
            .collect();
        (service, drivers, riders)
    }
}

pub fn is_available(service: &DispatchService, driver: DriverId) -> bool {
    service.driver(driver).expect("registered driver").available
}
