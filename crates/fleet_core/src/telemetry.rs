//! Telemetry: the append-only simulation event log.
//!
//! [SimTelemetry] is the sole data contract between the core and external
//! reporting; records carry a state snapshot and serialize with serde. The
//! runner owns the resource; systems append, nothing mutates past records.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::ecs::{DriveMode, Vehicle};

/// What happened to a vehicle at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FleetEventKind {
    ModeChange(DriveMode),
    ChargeStart,
    ChargeEnd,
    Arrived,
    Stranded,
    /// Still en route or charging when the horizon was reached. An accepted
    /// outcome, not an error.
    Incomplete,
}

impl FleetEventKind {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Arrived | Self::Stranded | Self::Incomplete)
    }
}

/// One timestamped log record with the vehicle state at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetEvent {
    pub timestamp_ms: u64,
    pub vehicle_id: u32,
    pub kind: FleetEventKind,
    pub soc: f64,
    pub position_km: f64,
    pub velocity_kmh: f64,
}

impl FleetEvent {
    /// Snapshot `vehicle` into a record for `kind` at `timestamp_ms`.
    pub fn capture(timestamp_ms: u64, vehicle: &Vehicle, kind: FleetEventKind) -> Self {
        Self {
            timestamp_ms,
            vehicle_id: vehicle.id,
            kind,
            soc: vehicle.soc,
            position_km: vehicle.position_km,
            velocity_kmh: vehicle.velocity_kmh,
        }
    }
}

/// Aggregated terminal outcomes for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub arrived: usize,
    pub stranded: usize,
    pub incomplete: usize,
}

/// Collects simulation telemetry. Insert as a resource to record the run.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub events: Vec<FleetEvent>,
}

impl SimTelemetry {
    pub fn record(&mut self, event: FleetEvent) {
        self.events.push(event);
    }

    pub fn events_for(&self, vehicle_id: u32) -> impl Iterator<Item = &FleetEvent> {
        self.events.iter().filter(move |e| e.vehicle_id == vehicle_id)
    }

    /// Terminal record for a vehicle, if its trip has concluded.
    pub fn outcome_for(&self, vehicle_id: u32) -> Option<&FleetEvent> {
        self.events_for(vehicle_id).find(|e| e.kind.is_terminal())
    }

    pub fn outcome_counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for event in &self.events {
            match event.kind {
                FleetEventKind::Arrived => counts.arrived += 1,
                FleetEventKind::Stranded => counts.stranded += 1,
                FleetEventKind::Incomplete => counts.incomplete += 1,
                _ => {}
            }
        }
        counts
    }
}
