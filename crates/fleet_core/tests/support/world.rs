use bevy_ecs::prelude::World;

use fleet_core::ecs::Vehicle;
use fleet_core::runner::run_scenario;
use fleet_core::scenario::ScenarioParams;
use fleet_core::telemetry::{FleetEvent, FleetEventKind};

/// Runs a scenario to its horizon and returns the finished world.
pub fn run(params: ScenarioParams) -> World {
    let mut world = World::new();
    run_scenario(&mut world, params).expect("scenario should build and run");
    world
}

/// All vehicles in the world, sorted by id.
pub fn vehicles(world: &mut World) -> Vec<Vehicle> {
    let mut query = world.query::<&Vehicle>();
    let mut all: Vec<Vehicle> = query.iter(world).copied().collect();
    all.sort_by_key(|v| v.id);
    all
}

/// Log records of one kind, in log order.
pub fn events_of_kind(world: &World, kind: FleetEventKind) -> Vec<FleetEvent> {
    world
        .resource::<fleet_core::telemetry::SimTelemetry>()
        .events
        .iter()
        .filter(|e| e.kind == kind)
        .copied()
        .collect()
}

/// Replays the log and returns the highest number of simultaneously active
/// charging sessions.
pub fn max_concurrent_sessions(world: &World) -> usize {
    let mut active = 0usize;
    let mut max = 0usize;
    for event in &world.resource::<fleet_core::telemetry::SimTelemetry>().events {
        match event.kind {
            FleetEventKind::ChargeStart => {
                active += 1;
                max = max.max(active);
            }
            FleetEventKind::ChargeEnd => active = active.saturating_sub(1),
            _ => {}
        }
    }
    max
}
