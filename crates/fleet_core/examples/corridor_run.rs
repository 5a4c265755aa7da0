//! Run the 3-vehicle corridor scenario with low batteries and print the log.
//!
//! Run with: cargo run -p fleet_core --example corridor_run

use bevy_ecs::prelude::World;
use fleet_core::runner::run_scenario;
use fleet_core::scenario::{ArrivalMode, ScenarioParams};
use fleet_core::telemetry::SimTelemetry;

fn main() {
    let params = ScenarioParams::default()
        .with_seed(42)
        .with_initial_soc(0.25)
        .with_arrival_mode(ArrivalMode::Staggered { gap_minutes: 2.0 });

    let mut world = World::new();
    let steps = match run_scenario(&mut world, params) {
        Ok(steps) => steps,
        Err(err) => {
            eprintln!("invalid scenario: {err}");
            std::process::exit(1);
        }
    };

    let clock = world.resource::<fleet_core::clock::SimulationClock>();
    let telemetry = world.resource::<SimTelemetry>();
    let counts = telemetry.outcome_counts();

    println!("--- Corridor run (3 vehicles at 25% charge, 2 min stagger, seed 42) ---");
    println!("Events processed: {}", steps);
    println!("Simulation time: {:.1} min", clock.now_minutes());
    println!(
        "Outcomes: {} arrived, {} stranded, {} incomplete",
        counts.arrived, counts.stranded, counts.incomplete
    );

    println!("\nEvent log:");
    for event in &telemetry.events {
        println!(
            "  t={:6.1} min  vehicle={}  {:?}  soc={:.3}  pos={:6.1} km  v={:5.1} km/h",
            event.timestamp_ms as f64 / 60_000.0,
            event.vehicle_id,
            event.kind,
            event.soc,
            event.position_km,
            event.velocity_kmh,
        );
    }
}
