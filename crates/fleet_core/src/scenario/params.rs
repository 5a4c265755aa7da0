use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// How departure times are generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArrivalMode {
    /// Fixed gap between departures, in minutes.
    Staggered { gap_minutes: f64 },
    /// Exponential gaps (Poisson process) with the given mean, in minutes.
    Poisson { mean_minutes: f64 },
}

impl Default for ArrivalMode {
    fn default() -> Self {
        Self::Staggered { gap_minutes: 10.0 }
    }
}

/// Simulation end time in clock milliseconds. The runner stops before
/// processing any event at or past this instant.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTimeMs(pub u64);

/// Driving-loop cadence in minutes.
#[derive(Debug, Clone, Copy, Resource)]
pub struct TickMinutes(pub f64);

/// When to request a charger and how full to recharge.
#[derive(Debug, Clone, Copy, Resource, Serialize, Deserialize)]
pub struct ChargingPolicy {
    /// Request a charger once the SOC falls to this level while en route.
    pub trigger_soc: f64,
    /// SOC restored when a session completes.
    pub target_soc: f64,
}

impl Default for ChargingPolicy {
    fn default() -> Self {
        Self {
            trigger_soc: 0.20,
            target_soc: 0.85,
        }
    }
}

/// Parameters for building a corridor scenario. Defaults model the 98 km
/// CDMX–Pachuca corridor: three vehicles at 90% charge sharing two 180 kW
/// chargers, thinking every two minutes, over a 300 minute horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub route_distance_km: f64,
    pub fleet_size: usize,
    pub initial_soc: f64,
    pub battery_capacity_kwh: f64,
    pub charger_count: usize,
    pub charger_power_kw: f64,
    pub tick_minutes: f64,
    pub horizon_minutes: f64,
    pub arrival_mode: ArrivalMode,
    pub charging: ChargingPolicy,
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            route_distance_km: 98.0,
            fleet_size: 3,
            initial_soc: 0.90,
            battery_capacity_kwh: 85.0,
            charger_count: 2,
            charger_power_kw: 180.0,
            tick_minutes: 2.0,
            horizon_minutes: 300.0,
            arrival_mode: ArrivalMode::default(),
            charging: ChargingPolicy::default(),
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fleet_size(mut self, fleet_size: usize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    pub fn with_initial_soc(mut self, initial_soc: f64) -> Self {
        self.initial_soc = initial_soc;
        self
    }

    pub fn with_route_distance_km(mut self, route_distance_km: f64) -> Self {
        self.route_distance_km = route_distance_km;
        self
    }

    pub fn with_battery_capacity_kwh(mut self, battery_capacity_kwh: f64) -> Self {
        self.battery_capacity_kwh = battery_capacity_kwh;
        self
    }

    pub fn with_horizon_minutes(mut self, horizon_minutes: f64) -> Self {
        self.horizon_minutes = horizon_minutes;
        self
    }

    pub fn with_arrival_mode(mut self, arrival_mode: ArrivalMode) -> Self {
        self.arrival_mode = arrival_mode;
        self
    }

    pub fn with_chargers(mut self, count: usize, power_kw: f64) -> Self {
        self.charger_count = count;
        self.charger_power_kw = power_kw;
        self
    }

    pub fn with_tick_minutes(mut self, tick_minutes: f64) -> Self {
        self.tick_minutes = tick_minutes;
        self
    }

    pub fn with_charging(mut self, charging: ChargingPolicy) -> Self {
        self.charging = charging;
        self
    }

    /// Fail-fast validation, run at scenario construction before any event.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.fleet_size == 0 {
            return Err(ScenarioError::EmptyFleet);
        }
        if self.charger_count == 0 {
            return Err(ScenarioError::NoChargers);
        }
        if self.battery_capacity_kwh <= 0.0 {
            return Err(ScenarioError::NonPositiveBatteryCapacity(
                self.battery_capacity_kwh,
            ));
        }
        if self.charger_power_kw <= 0.0 {
            return Err(ScenarioError::NonPositiveChargerPower(self.charger_power_kw));
        }
        if self.tick_minutes <= 0.0 {
            return Err(ScenarioError::NonPositiveTick(self.tick_minutes));
        }
        if self.route_distance_km <= 0.0 {
            return Err(ScenarioError::NonPositiveRoute(self.route_distance_km));
        }
        if self.horizon_minutes <= 0.0 {
            return Err(ScenarioError::NonPositiveHorizon(self.horizon_minutes));
        }
        if !(0.0..=1.0).contains(&self.initial_soc) || self.initial_soc == 0.0 {
            return Err(ScenarioError::SocOutOfRange {
                field: "initial_soc",
                value: self.initial_soc,
            });
        }
        if !(0.0..1.0).contains(&self.charging.trigger_soc) || self.charging.trigger_soc == 0.0 {
            return Err(ScenarioError::SocOutOfRange {
                field: "trigger_soc",
                value: self.charging.trigger_soc,
            });
        }
        if !(0.0..=1.0).contains(&self.charging.target_soc)
            || self.charging.target_soc <= self.charging.trigger_soc
        {
            return Err(ScenarioError::SocOutOfRange {
                field: "target_soc",
                value: self.charging.target_soc,
            });
        }
        Ok(())
    }
}

/// Invalid configuration, rejected before the simulation is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    EmptyFleet,
    NoChargers,
    NonPositiveBatteryCapacity(f64),
    NonPositiveChargerPower(f64),
    NonPositiveTick(f64),
    NonPositiveRoute(f64),
    NonPositiveHorizon(f64),
    SocOutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFleet => write!(f, "fleet size must be at least 1"),
            Self::NoChargers => write!(f, "charger count must be at least 1"),
            Self::NonPositiveBatteryCapacity(v) => {
                write!(f, "battery capacity must be positive, got {v} kWh")
            }
            Self::NonPositiveChargerPower(v) => {
                write!(f, "charger power must be positive, got {v} kW")
            }
            Self::NonPositiveTick(v) => {
                write!(f, "tick duration must be positive, got {v} minutes")
            }
            Self::NonPositiveRoute(v) => {
                write!(f, "route distance must be positive, got {v} km")
            }
            Self::NonPositiveHorizon(v) => {
                write!(f, "simulation horizon must be positive, got {v} minutes")
            }
            Self::SocOutOfRange { field, value } => {
                write!(f, "{field} must be a fraction in (0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
