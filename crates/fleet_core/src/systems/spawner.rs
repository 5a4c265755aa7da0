//! Departure systems: arm the spawner at simulation start, then spawn one
//! vehicle per `SpawnVehicle` event until the fleet is out.

use bevy_ecs::prelude::{Commands, ResMut};

use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::ecs::Vehicle;
use crate::spawner::VehicleSpawner;

/// Schedules the first departure when `SimulationStarted` is dispatched.
pub fn simulation_started_system(
    mut clock: ResMut<SimulationClock>,
    mut spawner: ResMut<VehicleSpawner>,
) {
    if spawner.initialized() {
        return;
    }
    spawner.set_initialized(true);
    if spawner.should_spawn() {
        clock.schedule_at(spawner.next_spawn_ms(), EventKind::SpawnVehicle, None);
    }
}

/// Spawns one vehicle, gives it an immediate first tick, and schedules the
/// next departure.
pub fn vehicle_spawner_system(
    mut commands: Commands,
    mut clock: ResMut<SimulationClock>,
    mut spawner: ResMut<VehicleSpawner>,
) {
    if !spawner.should_spawn() {
        return;
    }

    let now = clock.now();
    let id = spawner.advance(now);
    let entity = commands
        .spawn(Vehicle::new(
            id,
            spawner.config.initial_soc,
            spawner.config.route_distance_km,
        ))
        .id();
    clock.schedule_at(now, EventKind::VehicleTick, Some(EventSubject::Vehicle(entity)));

    if spawner.should_spawn() {
        clock.schedule_at(spawner.next_spawn_ms(), EventKind::SpawnVehicle, None);
    }
}
