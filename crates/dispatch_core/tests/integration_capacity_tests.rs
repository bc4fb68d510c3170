mod support;

use dispatch_core::{
    CapacityExceeded, CapacityKind, DispatchConfig, DispatchError, DispatchService, DriverId,
    Point, RideId,
};
use support::ServiceBuilder;

#[test]
fn driver_ids_increase_from_configured_base() {
    let mut service = DispatchService::new(DispatchConfig::default().with_id_base(5));
    let ids: Vec<DriverId> = (0..4)
        .map(|i| {
            service
                .register_driver(format!("d{i}"), 4.0, Point::ORIGIN)
                .expect("driver")
        })
        .collect();

    assert_eq!(ids.first(), Some(&DriverId(5)));
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    let listed: Vec<DriverId> = service.drivers().iter().map(|d| d.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn full_rider_queue_rejects_requests() {
    let (mut service, _, _) = ServiceBuilder::new()
        .with_config(DispatchConfig::default().with_max_waiting_riders(2))
        .with_rider("a", 0.0, 0.0)
        .with_rider("b", 0.0, 0.0)
        .build();

    let err = service
        .request_ride("c", Point::ORIGIN, Point::ORIGIN)
        .unwrap_err();

    assert_eq!(
        err,
        CapacityExceeded {
            kind: CapacityKind::WaitingRiders,
            limit: 2,
        }
    );
    assert_eq!(service.waiting_riders().len(), 2);
}

#[test]
fn full_ledger_fails_dispatch_without_side_effects() {
    let (mut service, drivers, riders) = ServiceBuilder::new()
        .with_config(DispatchConfig::default().with_max_rides(1))
        .with_driver("a", 4.0, 0.0, 0.0)
        .with_driver("b", 4.0, 0.0, 0.0)
        .with_rider("r1", 0.0, 0.0)
        .with_rider("r2", 0.0, 0.0)
        .build();

    service.dispatch().expect("first ride fits");
    let err = service.dispatch().unwrap_err();

    assert!(matches!(
        err,
        DispatchError::CapacityExceeded(CapacityExceeded {
            kind: CapacityKind::Rides,
            limit: 1,
        })
    ));
    assert!(service.driver(drivers[1]).expect("b").available);
    assert_eq!(service.next_rider().map(|r| r.id), Some(riders[1]));
    assert_eq!(service.stats().capacity_rejections, 1);
}

#[test]
fn legacy_limits_cap_driver_registry() {
    let mut service = DispatchService::new(DispatchConfig::legacy_limits());
    for i in 0..50 {
        service
            .register_driver(format!("d{i}"), 4.0, Point::ORIGIN)
            .expect("within legacy bound");
    }
    let err = service
        .register_driver("overflow", 4.0, Point::ORIGIN)
        .unwrap_err();
    assert_eq!(err.kind, CapacityKind::Drivers);
    assert_eq!(service.drivers().len(), 50);
}

#[test]
fn records_serialize_for_listings() {
    let (mut service, _, _) = ServiceBuilder::new()
        .with_driver("d", 4.5, 1.0, 2.0)
        .with_rider("r", 0.0, 0.0)
        .build();
    service.dispatch().expect("dispatch");

    let driver = serde_json::to_value(&service.drivers()[0])
        .expect("driver json");
    assert_eq!(driver["name"], "d");
    assert_eq!(driver["available"], false);

    let ride = serde_json::to_value(&service.rides()[0])
        .expect("ride json");
    assert_eq!(ride["status"], "ongoing");
    assert_eq!(ride["driver"], 1);
}

#[test]
fn id_base_at_max_reports_exhaustion_instead_of_wrapping() {
    let config = DispatchConfig::default().with_id_base(u64::MAX);
    let mut service = DispatchService::new(config);

    let driver = service
        .register_driver("a", 1.0, Point::ORIGIN)
        .expect("last driver id");
    let err = service
        .register_driver("b", 1.0, Point::ORIGIN)
        .unwrap_err();
    assert_eq!(driver, DriverId(u64::MAX));
    assert_eq!(err.kind, CapacityKind::Ids);

    service
        .request_ride("r", Point::ORIGIN, Point::ORIGIN)
        .expect("last rider id");
    let assignment = service.dispatch().expect("last ride id");
    assert_eq!(assignment.ride, RideId(u64::MAX));
    service.complete_ride(driver).expect("complete");

    let err = service
        .request_ride("late", Point::ORIGIN, Point::ORIGIN)
        .unwrap_err();
    assert_eq!(err.kind, CapacityKind::Ids);
    assert_eq!(service.drivers().len(), 1);
    assert!(service.waiting_riders().is_empty());
}
