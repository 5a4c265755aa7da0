//! The driving loop: sense state, consult the fuzzy controller, apply the
//! physics step, then transition the vehicle's state machine.
//!
//! One `VehicleTick` event covers `TickMinutes` of driving starting at the
//! event's timestamp; a vehicle that keeps driving reschedules itself one
//! tick later. Charging vehicles receive no ticks until their session
//! completes.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::charging::{ChargerPool, ChargingRequest};
use crate::clock::{minutes_to_ms, CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{DriveMode, Vehicle, VehicleStatus};
use crate::fuzzy::FuzzyController;
use crate::physics::PhysicsModel;
use crate::scenario::{ChargingPolicy, TickMinutes};
use crate::telemetry::{FleetEvent, FleetEventKind, SimTelemetry};

#[allow(clippy::too_many_arguments)]
pub fn vehicle_tick_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    controller: Res<FuzzyController>,
    physics: Res<PhysicsModel>,
    policy: Res<ChargingPolicy>,
    tick: Res<TickMinutes>,
    mut pool: ResMut<ChargerPool>,
    mut telemetry: ResMut<SimTelemetry>,
    mut vehicles: Query<&mut Vehicle>,
) {
    let Some(EventSubject::Vehicle(entity)) = event.0.subject else {
        return;
    };
    let Ok(mut vehicle) = vehicles.get_mut(entity) else {
        return;
    };
    if vehicle.status != VehicleStatus::EnRoute {
        return;
    }

    let now = clock.now();
    let aggression = controller.infer(vehicle.soc, vehicle.distance_remaining_km);
    let outcome = physics.step_capped(
        vehicle.soc,
        aggression,
        tick.0,
        vehicle.distance_remaining_km,
    );
    debug_assert!(
        outcome.velocity_kmh >= physics.min_speed_kmh
            && outcome.velocity_kmh <= physics.min_speed_kmh + physics.speed_span_kmh,
        "velocity {} outside the model's band",
        outcome.velocity_kmh
    );

    vehicle.soc = outcome.soc;
    vehicle.velocity_kmh = outcome.velocity_kmh;
    vehicle.position_km += outcome.distance_km;
    vehicle.distance_remaining_km = (vehicle.distance_remaining_km - outcome.distance_km).max(0.0);
    vehicle.elapsed_minutes += tick.0;

    let mode = DriveMode::from_aggression(aggression);
    if mode != vehicle.mode {
        vehicle.mode = mode;
        telemetry.record(FleetEvent::capture(
            now,
            &vehicle,
            FleetEventKind::ModeChange(mode),
        ));
    }

    if vehicle.distance_remaining_km <= 0.0 {
        vehicle.status = VehicleStatus::Arrived;
        telemetry.record(FleetEvent::capture(now, &vehicle, FleetEventKind::Arrived));
        return;
    }

    if vehicle.soc <= 0.0 {
        vehicle.status = VehicleStatus::Stranded;
        vehicle.velocity_kmh = 0.0;
        telemetry.record(FleetEvent::capture(now, &vehicle, FleetEventKind::Stranded));
        return;
    }

    if vehicle.soc <= policy.trigger_soc {
        vehicle.status = VehicleStatus::Charging;
        vehicle.velocity_kmh = 0.0;
        let request = ChargingRequest {
            vehicle: entity,
            vehicle_id: vehicle.id,
            requested_at: now,
            energy_needed_kwh: physics.energy_to_charge_kwh(vehicle.soc, policy.target_soc),
        };
        if let Some(started) = pool.submit(request) {
            // The queue was empty, so the started session is this request.
            debug_assert_eq!(started.vehicle, entity);
            telemetry.record(FleetEvent::capture(
                now,
                &vehicle,
                FleetEventKind::ChargeStart,
            ));
            clock.schedule_in(
                pool.session_ms(started.energy_needed_kwh),
                EventKind::ChargeComplete,
                Some(EventSubject::Vehicle(entity)),
            );
        }
        return;
    }

    clock.schedule_in(
        minutes_to_ms(tick.0),
        EventKind::VehicleTick,
        Some(EventSubject::Vehicle(entity)),
    );
}
