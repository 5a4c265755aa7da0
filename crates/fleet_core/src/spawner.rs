//! Vehicle arrival generator: dispatches the fleet onto the corridor over
//! time, one `SpawnVehicle` event per departure.

use bevy_ecs::prelude::Resource;

use crate::distributions::InterArrivalDistribution;

#[derive(Debug)]
pub struct VehicleSpawnerConfig {
    pub fleet_size: usize,
    pub initial_soc: f64,
    pub route_distance_km: f64,
    pub inter_arrival: Box<dyn InterArrivalDistribution>,
}

/// Bookkeeping for staggered departures. The spawner system consumes
/// `SpawnVehicle` events and schedules the next one until the fleet is out.
#[derive(Debug, Resource)]
pub struct VehicleSpawner {
    pub config: VehicleSpawnerConfig,
    spawned: usize,
    next_id: u32,
    next_spawn_ms: u64,
    initialized: bool,
}

impl VehicleSpawner {
    pub fn new(config: VehicleSpawnerConfig) -> Self {
        Self {
            config,
            spawned: 0,
            next_id: 0,
            next_spawn_ms: 0,
            initialized: false,
        }
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn should_spawn(&self) -> bool {
        self.spawned < self.config.fleet_size
    }

    pub fn next_spawn_ms(&self) -> u64 {
        self.next_spawn_ms
    }

    /// Claim the next vehicle id and advance the departure schedule.
    pub fn advance(&mut self, now_ms: u64) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;
        let gap = self.config.inter_arrival.sample_ms(self.spawned as u64);
        self.next_spawn_ms = now_ms + gap.round().max(0.0) as u64;
        id
    }
}
