//! Test helpers for common world setup.
//!
//! Shared across unit and integration tests to avoid repeating resource
//! wiring; gated behind the default `test-helpers` feature.

use bevy_ecs::prelude::{Entity, World};

use crate::charging::ChargerPool;
use crate::clock::SimulationClock;
use crate::ecs::Vehicle;
use crate::fuzzy::FuzzyController;
use crate::physics::PhysicsModel;
use crate::scenario::{ChargingPolicy, TickMinutes};
use crate::telemetry::SimTelemetry;

/// Minimal world with every resource the driving-loop systems expect:
/// default physics and controller, two 180 kW chargers, 2 minute ticks.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(FuzzyController::default());
    world.insert_resource(PhysicsModel::default());
    world.insert_resource(ChargerPool::new(2, 180.0));
    world.insert_resource(ChargingPolicy::default());
    world.insert_resource(TickMinutes(2.0));
    world
}

/// Spawn a vehicle with the given battery level and remaining distance.
pub fn spawn_vehicle(world: &mut World, id: u32, soc: f64, distance_km: f64) -> Entity {
    world.spawn(Vehicle::new(id, soc, distance_km)).id()
}
