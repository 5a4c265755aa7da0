//! Charging-session completion: restore the battery, resume the trip, and
//! hand the freed charger to the next request in line.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::charging::ChargerPool;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Vehicle, VehicleStatus};
use crate::scenario::ChargingPolicy;
use crate::telemetry::{FleetEvent, FleetEventKind, SimTelemetry};

pub fn charge_complete_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    policy: Res<ChargingPolicy>,
    mut pool: ResMut<ChargerPool>,
    mut telemetry: ResMut<SimTelemetry>,
    mut vehicles: Query<&mut Vehicle>,
) {
    let Some(EventSubject::Vehicle(entity)) = event.0.subject else {
        return;
    };
    let now = clock.now();

    if let Ok(mut vehicle) = vehicles.get_mut(entity) {
        if vehicle.status == VehicleStatus::Charging {
            vehicle.soc = policy.target_soc;
            vehicle.status = VehicleStatus::EnRoute;
            telemetry.record(FleetEvent::capture(now, &vehicle, FleetEventKind::ChargeEnd));
            // Resume driving immediately; the next tick covers [now, now+dt].
            clock.schedule_at(now, EventKind::VehicleTick, Some(EventSubject::Vehicle(entity)));
        }
    }

    if let Some(next) = pool.release() {
        if let Ok(queued) = vehicles.get_mut(next.vehicle) {
            telemetry.record(FleetEvent::capture(
                now,
                &queued,
                FleetEventKind::ChargeStart,
            ));
        }
        clock.schedule_in(
            pool.session_ms(next.energy_needed_kwh),
            EventKind::ChargeComplete,
            Some(EventSubject::Vehicle(next.vehicle)),
        );
    }
}
