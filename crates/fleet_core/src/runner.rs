//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each
//! step pops the next event from [SimulationClock], inserts it as
//! [CurrentEvent], then runs the schedule. The run stops at
//! [SimulationEndTimeMs] (the horizon) or when the event queue drains, i.e.
//! when every vehicle reached a terminal state.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::ecs::Vehicle;
use crate::scenario::{build_scenario, ScenarioError, ScenarioParams, SimulationEndTimeMs};
use crate::systems::{
    charge_complete::charge_complete_system,
    spawner::{simulation_started_system, vehicle_spawner_system},
    vehicle_tick::vehicle_tick_system,
};
use crate::telemetry::{FleetEvent, FleetEventKind, SimTelemetry};

// Condition functions for each event kind
fn is_simulation_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SimulationStarted)
        .unwrap_or(false)
}

fn is_spawn_vehicle(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SpawnVehicle)
        .unwrap_or(false)
}

fn is_vehicle_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::VehicleTick)
        .unwrap_or(false)
}

fn is_charge_complete(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::ChargeComplete)
        .unwrap_or(false)
}

/// Runs one simulation step: pops the next event, inserts it as
/// [CurrentEvent], then runs the schedule. Returns `true` if an event was
/// processed, `false` if the clock was empty or the next event is at or past
/// [SimulationEndTimeMs] (when that resource is present).
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let stop_at = world.get_resource::<SimulationEndTimeMs>().map(|e| e.0);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|c| c.next_event_time());
    if let (Some(end_ms), Some(ts)) = (stop_at, next_ts) {
        if ts >= end_ms {
            return false;
        }
    }

    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    schedule.run(world);
    true
}

/// Runs simulation steps until the event queue is empty, the horizon is
/// reached, or `max_steps` is hit. Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Builds the default simulation schedule: all event-reacting systems plus
/// [apply_deferred] so that spawned vehicles are applied before the next step.
///
/// Systems are conditionally executed based on event type.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        simulation_started_system.run_if(is_simulation_started),
        vehicle_spawner_system.run_if(is_spawn_vehicle),
        vehicle_tick_system.run_if(is_vehicle_tick),
        charge_complete_system.run_if(is_charge_complete),
        apply_deferred,
    ));
    schedule
}

/// Initializes the simulation by scheduling the SimulationStarted event at
/// time 0. Call this after building the scenario and before running events.
pub fn initialize_simulation(world: &mut World) {
    let mut clock = world.resource_mut::<SimulationClock>();
    clock.schedule_at(0, EventKind::SimulationStarted, None);
}

/// Logs an `Incomplete` record for every vehicle not yet terminal. Call once
/// after the run loop stops; vehicles cut off by the horizon are an accepted
/// outcome, not an error.
pub fn finalize_incomplete(world: &mut World) {
    let horizon = world
        .get_resource::<SimulationEndTimeMs>()
        .map(|e| e.0)
        .unwrap_or_else(|| world.resource::<SimulationClock>().now());

    let mut query = world.query::<&Vehicle>();
    let open: Vec<FleetEvent> = query
        .iter(world)
        .filter(|v| !v.status.is_terminal())
        .map(|v| FleetEvent::capture(horizon, v, FleetEventKind::Incomplete))
        .collect();

    let mut telemetry = world.resource_mut::<SimTelemetry>();
    for event in open {
        telemetry.record(event);
    }
}

/// Builds, runs to the horizon, and finalizes: a whole corridor run in one
/// call. Returns the number of events processed. The step cap is generous; a
/// corridor run is at most a few thousand events per vehicle.
pub fn run_scenario(world: &mut World, params: ScenarioParams) -> Result<usize, ScenarioError> {
    build_scenario(world, params)?;
    initialize_simulation(world);
    let mut schedule = simulation_schedule();
    let steps = run_until_empty(world, &mut schedule, 1_000_000);
    finalize_incomplete(world);
    Ok(steps)
}
