//! Simulation core validation tests
//!
//! Exercises the public API: spawn placement, the state machine, the
//! snapshot round-trip, the car-following law, and terminal detection.

use lane_sim::simulation::{
    follow_action, FollowAction, RunState, SimConfig, SimError, SimVehicle, SimWorld, VehicleClass,
};

/// Build a vehicle with explicit kinematics for scenario setups.
fn vehicle(label: &str, position: f32, length: f32, speed: f32, top_speed: f32) -> SimVehicle {
    SimVehicle {
        position,
        length,
        width: 20.0,
        speed,
        acceleration: 0.0,
        top_speed,
        top_acceleration: 1.0,
        label: label.to_string(),
        color: "gray",
    }
}

#[test]
fn test_follow_action_thresholds() {
    let config = SimConfig::default(); // min 15, max 20

    assert_eq!(follow_action(-1.0, &config), FollowAction::Collision);
    assert_eq!(follow_action(0.0, &config), FollowAction::Collision);
    assert_eq!(follow_action(10.0, &config), FollowAction::Brake);
    // Band edges hold
    assert_eq!(follow_action(15.0, &config), FollowAction::Hold);
    assert_eq!(follow_action(20.0, &config), FollowAction::Hold);
    assert_eq!(follow_action(25.0, &config), FollowAction::Accelerate);
}

#[test]
fn test_spawn_placement() {
    let mut world = SimWorld::default();
    let lane = world.add_lane(100.0);

    world.add_vehicle(lane, VehicleClass::Small).unwrap();
    world.add_vehicle(lane, VehicleClass::Small).unwrap();
    world.add_vehicle(lane, VehicleClass::Big).unwrap();

    let vehicles = &world.lanes[lane].vehicles;

    // First vehicle's leading edge sits at the start line
    assert_eq!(vehicles[0].leading_edge(), world.config.start_line);
    // Each later vehicle leaves the standing distance to the one ahead
    assert_eq!(
        vehicles[1].leading_edge(),
        vehicles[0].position - world.config.min_standing_distance
    );
    assert_eq!(
        vehicles[2].leading_edge(),
        vehicles[1].position - world.config.min_standing_distance
    );
    assert!(world.lanes[lane].is_ordered());

    // Labels come from the lane identifier and spawn order
    assert_eq!(vehicles[0].label, "1-1");
    assert_eq!(vehicles[2].label, "1-3");
}

#[test]
fn test_add_vehicle_invalid_lane() {
    let mut world = SimWorld::default();
    world.add_lane(100.0);

    let result = world.add_vehicle(5, VehicleClass::Small);
    assert_eq!(result, Err(SimError::InvalidLane { index: 5, lanes: 1 }));
}

#[test]
fn test_tick_is_noop_unless_running() {
    let mut world = SimWorld::default();
    let lane = world.add_lane(100.0);
    world.add_vehicle(lane, VehicleClass::Small).unwrap();

    let before = world.lanes[lane].vehicles[0].position;
    world.tick();
    assert_eq!(world.state, RunState::NotStarted);
    assert_eq!(world.lanes[lane].vehicles[0].position, before);
}

#[test]
fn test_pause_and_resume() {
    let config = SimConfig {
        finish_line: 10_000.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);
    let lane = world.add_lane(100.0);
    world.add_vehicle(lane, VehicleClass::Small).unwrap();

    world.start();
    assert_eq!(world.state, RunState::Running);
    for _ in 0..5 {
        world.tick();
    }

    world.pause();
    assert_eq!(world.state, RunState::Paused);
    let frozen = world.lanes[lane].vehicles[0].position;
    for _ in 0..3 {
        world.tick();
    }
    assert_eq!(world.lanes[lane].vehicles[0].position, frozen);

    world.resume();
    assert_eq!(world.state, RunState::Running);
    world.tick();
    assert!(world.lanes[lane].vehicles[0].position > frozen);
}

#[test]
fn test_lead_vehicle_runs_at_top_speed() {
    let config = SimConfig {
        finish_line: 10_000.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);
    let lane = world.add_lane(100.0);
    world.add_vehicle(lane, VehicleClass::Small).unwrap();
    world.add_vehicle(lane, VehicleClass::Small).unwrap();

    world.start();
    for _ in 0..10 {
        world.tick();
        let leader = &world.lanes[lane].vehicles[0];
        assert_eq!(leader.speed, leader.top_speed);
    }
}

#[test]
fn test_speed_clamp_invariant() {
    let mut world = SimWorld::default();
    for index in 0..2 {
        world.add_lane(100.0 + 400.0 * index as f32);
    }
    for lane in 0..2 {
        world.add_vehicle(lane, VehicleClass::Small).unwrap();
        world.add_vehicle(lane, VehicleClass::Big).unwrap();
        world.add_vehicle(lane, VehicleClass::Small).unwrap();
    }

    world.start();
    for _ in 0..200 {
        world.tick();
        for lane in &world.lanes {
            for vehicle in &lane.vehicles {
                assert!(vehicle.speed >= 0.0, "{} below zero", vehicle.label);
                assert!(
                    vehicle.speed <= vehicle.top_speed,
                    "{} above top speed",
                    vehicle.label
                );
            }
        }
        if world.state == RunState::Stopped {
            break;
        }
    }
}

#[test]
fn test_follower_accelerates_toward_distant_lead() {
    // Lead at position 0 already at top speed; follower 100 behind.
    // The gap starts at 80, above the safe band, so the follower applies
    // its top acceleration and its speed climbs to the cap without ever
    // exceeding it.
    let config = SimConfig {
        finish_line: 10_000.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);
    world.add_lane(100.0);

    world.lanes[0].vehicles.push(vehicle("lead", 0.0, 20.0, 5.0, 5.0));
    world.lanes[0].vehicles.push(vehicle("tail", -100.0, 20.0, 0.0, 5.0));

    world.start();
    for _ in 0..100 {
        world.tick();
        let tail = &world.lanes[0].vehicles[1];
        assert!(tail.speed <= 5.0);
        assert_eq!(tail.acceleration, tail.top_acceleration);
    }
    assert_eq!(world.lanes[0].vehicles[1].speed, 5.0);
    assert_eq!(world.state, RunState::Running);
}

#[test]
fn test_follower_holds_and_brakes_behind_slower_lead() {
    // A faster follower closes on a slower lead: it must pass through
    // accelerate, hold, and brake phases without ever colliding.
    let config = SimConfig {
        finish_line: 10_000.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);
    world.add_lane(100.0);

    world.lanes[0].vehicles.push(vehicle("lead", 0.0, 20.0, 3.0, 3.0));
    world.lanes[0].vehicles.push(vehicle("tail", -100.0, 20.0, 0.0, 5.0));

    world.start();
    let mut accelerated = false;
    let mut held = false;
    let mut braked = false;
    for _ in 0..300 {
        world.tick();
        let lead = &world.lanes[0].vehicles[0];
        let tail = &world.lanes[0].vehicles[1];
        let gap = lead.position - tail.position - tail.length;

        assert!(gap > 0.0, "vehicles collided, gap {}", gap);
        assert!(tail.speed >= 0.0 && tail.speed <= 5.0);

        if tail.acceleration == tail.top_acceleration {
            accelerated = true;
        } else if tail.acceleration == 0.0 {
            held = true;
        } else if tail.acceleration == world.config.braking_acceleration {
            braked = true;
        }
    }
    assert!(accelerated && held && braked);
    assert_eq!(world.state, RunState::Running);
}

#[test]
fn test_collision_stops_the_simulation() {
    let config = SimConfig {
        finish_line: 10_000.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);
    world.add_lane(100.0);

    // Stationary blocker, follower arriving too fast to stop.
    world.lanes[0].vehicles.push(vehicle("block", 50.0, 20.0, 0.0, 0.0));
    world.lanes[0].vehicles.push(vehicle("tail", 27.0, 20.0, 5.0, 5.0));

    world.start();
    world.tick();

    assert_eq!(world.state, RunState::Stopped);
    let blocker = &world.lanes[0].vehicles[0];
    let tail = &world.lanes[0].vehicles[1];
    assert_eq!(blocker.speed, 0.0);
    assert_eq!(blocker.acceleration, 0.0);
    assert_eq!(tail.speed, 0.0);
    assert_eq!(tail.acceleration, 0.0);

    // Once stopped, further ticks alter nothing.
    let positions: Vec<f32> = world.lanes[0].vehicles.iter().map(|v| v.position).collect();
    for _ in 0..5 {
        world.tick();
    }
    let after: Vec<f32> = world.lanes[0].vehicles.iter().map(|v| v.position).collect();
    assert_eq!(positions, after);
}

#[test]
fn test_finish_line_stops_the_lane() {
    // Leading edge reaches the finish coordinate exactly on a tick boundary.
    let mut world = SimWorld::default(); // finish at 100
    world.add_lane(100.0);
    world.lanes[0].vehicles.push(vehicle("solo", 30.0, 20.0, 5.0, 5.0));

    world.start();
    for _ in 0..10 {
        world.tick();
    }
    // After ten ticks the leading edge sits exactly on the finish line.
    assert_eq!(world.state, RunState::Running);
    assert_eq!(world.lanes[0].vehicles[0].leading_edge(), 100.0);

    // The next tick detects the crossing before any motion.
    world.tick();
    assert_eq!(world.state, RunState::Stopped);
    assert_eq!(world.lanes[0].vehicles[0].position, 80.0);

    world.tick();
    assert_eq!(world.lanes[0].vehicles[0].position, 80.0);
}

#[test]
fn test_snapshot_roundtrip_restores_the_run() {
    let config = SimConfig {
        finish_line: 10_000.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::new(config);
    for index in 0..2 {
        world.add_lane(100.0 + 400.0 * index as f32);
    }
    world.add_vehicle(0, VehicleClass::Small).unwrap();
    world.add_vehicle(0, VehicleClass::Big).unwrap();
    world.add_vehicle(1, VehicleClass::Small).unwrap();

    let before: Vec<(String, f32, f32)> = world
        .lanes
        .iter()
        .flat_map(|lane| &lane.vehicles)
        .map(|v| (v.label.clone(), v.position, v.speed))
        .collect();

    world.start();
    for _ in 0..20 {
        world.tick();
    }
    assert_ne!(world.lanes[0].vehicles[0].position, before[0].1);

    world.stop_to_start().unwrap();
    assert_eq!(world.state, RunState::NotStarted);

    let after: Vec<(String, f32, f32)> = world
        .lanes
        .iter()
        .flat_map(|lane| &lane.vehicles)
        .map(|v| (v.label.clone(), v.position, v.speed))
        .collect();
    assert_eq!(before, after);

    // The snapshot survives the restore, so the run can be replayed.
    world.start();
    assert_eq!(world.state, RunState::Running);
}

#[test]
fn test_stop_to_start_requires_a_snapshot() {
    let mut world = SimWorld::default();
    world.add_lane(100.0);
    assert_eq!(world.stop_to_start(), Err(SimError::NoSnapshot));
}

#[test]
fn test_restore_rejects_empty_snapshot() {
    let mut world = SimWorld::default();
    world.add_lane(100.0);
    assert_eq!(world.restore_lanes(Vec::new()), Err(SimError::NoSnapshot));
}

#[test]
fn test_reset_discards_lanes_and_snapshot() {
    let mut world = SimWorld::default();
    let lane = world.add_lane(100.0);
    world.add_vehicle(lane, VehicleClass::Small).unwrap();

    world.start();
    for _ in 0..5 {
        world.tick();
    }

    world.reset();
    assert_eq!(world.state, RunState::NotStarted);
    assert!(world.lanes.is_empty());
    // A full reset also forgets the snapshot.
    assert_eq!(world.stop_to_start(), Err(SimError::NoSnapshot));
}

#[test]
fn test_summary_reflects_state() {
    let mut world = SimWorld::default();
    let lane = world.add_lane(100.0);
    world.add_vehicle(lane, VehicleClass::Small).unwrap();

    assert!(world.summary().contains("not started"));
    assert!(world.summary().contains("Start"));
    world.start();
    assert!(world.summary().contains("running"));
    assert!(world.summary().contains("Pause"));
}
