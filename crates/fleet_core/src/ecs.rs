use bevy_ecs::prelude::Component;
use serde::Serialize;

/// Trip status of one vehicle. `Arrived` and `Stranded` are terminal: a
/// vehicle in either state issues no further physics updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VehicleStatus {
    EnRoute,
    Charging,
    Arrived,
    Stranded,
}

impl VehicleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Arrived | Self::Stranded)
    }
}

/// Drive mode derived from the controller's aggression output, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriveMode {
    Survival,
    Eco,
    Sport,
}

impl DriveMode {
    /// Round aggression to the nearest mode anchor (0.4 / 0.7 / 1.0). The
    /// exact 0.55 midpoint rounds down: a low battery never displays a more
    /// aggressive mode than it earns.
    pub fn from_aggression(aggression: f64) -> Self {
        if aggression <= 0.55 {
            Self::Survival
        } else if aggression < 0.85 {
            Self::Eco
        } else {
            Self::Sport
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Vehicle {
    pub id: u32,
    /// State of charge, fraction of battery energy remaining in [0, 1].
    pub soc: f64,
    pub distance_remaining_km: f64,
    /// Km driven from the origin.
    pub position_km: f64,
    pub velocity_kmh: f64,
    pub mode: DriveMode,
    pub status: VehicleStatus,
    /// Minutes of simulated driving this vehicle has experienced.
    pub elapsed_minutes: f64,
}

impl Vehicle {
    pub fn new(id: u32, initial_soc: f64, route_distance_km: f64) -> Self {
        Self {
            id,
            soc: initial_soc,
            distance_remaining_km: route_distance_km,
            position_km: 0.0,
            velocity_kmh: 0.0,
            mode: DriveMode::Eco,
            status: VehicleStatus::EnRoute,
            elapsed_minutes: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_rounds_to_nearest_anchor() {
        assert_eq!(DriveMode::from_aggression(0.4), DriveMode::Survival);
        assert_eq!(DriveMode::from_aggression(0.54), DriveMode::Survival);
        assert_eq!(DriveMode::from_aggression(0.55), DriveMode::Survival);
        assert_eq!(DriveMode::from_aggression(0.56), DriveMode::Eco);
        assert_eq!(DriveMode::from_aggression(0.7), DriveMode::Eco);
        assert_eq!(DriveMode::from_aggression(0.84), DriveMode::Eco);
        assert_eq!(DriveMode::from_aggression(0.85), DriveMode::Sport);
        assert_eq!(DriveMode::from_aggression(1.0), DriveMode::Sport);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!VehicleStatus::EnRoute.is_terminal());
        assert!(!VehicleStatus::Charging.is_terminal());
        assert!(VehicleStatus::Arrived.is_terminal());
        assert!(VehicleStatus::Stranded.is_terminal());
    }

    #[test]
    fn new_vehicle_starts_at_the_origin() {
        let v = Vehicle::new(3, 0.9, 98.0);
        assert_eq!(v.id, 3);
        assert_eq!(v.soc, 0.9);
        assert_eq!(v.distance_remaining_km, 98.0);
        assert_eq!(v.position_km, 0.0);
        assert_eq!(v.status, VehicleStatus::EnRoute);
    }
}
