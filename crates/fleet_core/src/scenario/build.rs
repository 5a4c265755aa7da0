use bevy_ecs::prelude::World;

use crate::charging::ChargerPool;
use crate::clock::{minutes_to_ms, SimulationClock};
use crate::distributions::{
    ExponentialInterArrival, InterArrivalDistribution, StaggeredInterArrival,
};
use crate::fuzzy::FuzzyController;
use crate::physics::PhysicsModel;
use crate::scenario::params::{
    ArrivalMode, ScenarioError, ScenarioParams, SimulationEndTimeMs, TickMinutes,
};
use crate::spawner::{VehicleSpawner, VehicleSpawnerConfig};
use crate::telemetry::SimTelemetry;

/// Populate `world` with every resource a corridor run needs. Fails fast on
/// invalid parameters; nothing is inserted on error.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ScenarioError> {
    params.validate()?;

    let seed = params.seed.unwrap_or(0);
    let inter_arrival: Box<dyn InterArrivalDistribution> = match params.arrival_mode {
        ArrivalMode::Staggered { gap_minutes } => {
            Box::new(StaggeredInterArrival::from_minutes(gap_minutes))
        }
        ArrivalMode::Poisson { mean_minutes } => {
            Box::new(ExponentialInterArrival::new(mean_minutes, seed))
        }
    };

    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(FuzzyController::default());
    world.insert_resource(PhysicsModel {
        battery_capacity_kwh: params.battery_capacity_kwh,
        ..PhysicsModel::default()
    });
    world.insert_resource(ChargerPool::new(
        params.charger_count,
        params.charger_power_kw,
    ));
    world.insert_resource(params.charging);
    world.insert_resource(TickMinutes(params.tick_minutes));
    world.insert_resource(SimulationEndTimeMs(minutes_to_ms(params.horizon_minutes)));
    world.insert_resource(VehicleSpawner::new(VehicleSpawnerConfig {
        fleet_size: params.fleet_size,
        initial_soc: params.initial_soc,
        route_distance_km: params.route_distance_km,
        inter_arrival,
    }));

    Ok(())
}
