//! Vehicle physics: aggression to cruise speed, quadratic consumption, SOC
//! drain. Pure and total; the SOC floors at zero instead of failing.

use bevy_ecs::prelude::Resource;

/// Physical model of one vehicle class on the corridor. Field values default
/// to the BYD Seal figures; scenario parameters can override the capacity.
#[derive(Debug, Clone, Copy, Resource)]
pub struct PhysicsModel {
    /// Battery capacity in kWh.
    pub battery_capacity_kwh: f64,
    /// Consumption at the reference speed, kWh per km.
    pub base_consumption_kwh_per_km: f64,
    /// Cruise speed at aggression 0, km/h.
    pub min_speed_kmh: f64,
    /// Additional speed at aggression 1, km/h.
    pub speed_span_kmh: f64,
    /// Speed at which consumption equals the base figure, km/h.
    pub reference_speed_kmh: f64,
}

impl Default for PhysicsModel {
    fn default() -> Self {
        Self {
            battery_capacity_kwh: 85.0,
            base_consumption_kwh_per_km: 0.190,
            min_speed_kmh: 60.0,
            speed_span_kmh: 50.0,
            reference_speed_kmh: 80.0,
        }
    }
}

/// Result of advancing one vehicle by one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub velocity_kmh: f64,
    pub distance_km: f64,
    pub energy_kwh: f64,
    pub soc: f64,
}

impl PhysicsModel {
    /// Cruise velocity for an aggression factor.
    pub fn velocity_kmh(&self, aggression: f64) -> f64 {
        self.min_speed_kmh + self.speed_span_kmh * aggression
    }

    /// Consumption in kWh/km at `velocity_kmh`. Grows with the square of
    /// speed; air resistance dominates at highway speeds.
    pub fn consumption_kwh_per_km(&self, velocity_kmh: f64) -> f64 {
        let factor = (velocity_kmh / self.reference_speed_kmh).powi(2);
        self.base_consumption_kwh_per_km * factor
    }

    /// Advance `dt_minutes` of driving from `soc` at the given aggression.
    pub fn step(&self, soc: f64, aggression: f64, dt_minutes: f64) -> StepOutcome {
        self.step_capped(soc, aggression, dt_minutes, f64::INFINITY)
    }

    /// Like [PhysicsModel::step] but the distance advanced is capped; the
    /// final partial step of a trip consumes energy only for the distance
    /// actually driven.
    pub fn step_capped(
        &self,
        soc: f64,
        aggression: f64,
        dt_minutes: f64,
        max_distance_km: f64,
    ) -> StepOutcome {
        debug_assert!((0.0..=1.0).contains(&soc), "soc {soc} outside [0, 1]");

        let velocity_kmh = self.velocity_kmh(aggression);
        let distance_km = (velocity_kmh * dt_minutes / 60.0)
            .min(max_distance_km)
            .max(0.0);
        let energy_kwh = self.consumption_kwh_per_km(velocity_kmh) * distance_km;
        let soc_new = (soc - energy_kwh / self.battery_capacity_kwh).max(0.0);

        StepOutcome {
            velocity_kmh,
            distance_km,
            energy_kwh,
            soc: soc_new,
        }
    }

    /// Energy required to raise the SOC from `from_soc` to `to_soc`.
    pub fn energy_to_charge_kwh(&self, from_soc: f64, to_soc: f64) -> f64 {
        ((to_soc - from_soc) * self.battery_capacity_kwh).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_spans_sixty_to_one_ten() {
        let physics = PhysicsModel::default();
        assert_eq!(physics.velocity_kmh(0.4), 80.0);
        assert_eq!(physics.velocity_kmh(1.0), 110.0);
        assert!((physics.velocity_kmh(0.7) - 95.0).abs() < 1e-12);
    }

    #[test]
    fn consumption_is_quadratic_in_speed() {
        let physics = PhysicsModel::default();
        // At the reference speed the factor is exactly 1.
        assert!((physics.consumption_kwh_per_km(80.0) - 0.190).abs() < 1e-12);
        let at_110 = physics.consumption_kwh_per_km(110.0);
        assert!((at_110 - 0.190 * (110.0_f64 / 80.0).powi(2)).abs() < 1e-12);
        assert!(at_110 > physics.consumption_kwh_per_km(62.0));
    }

    #[test]
    fn step_advances_distance_and_drains_soc() {
        let physics = PhysicsModel::default();
        let out = physics.step(0.90, 1.0, 2.0);
        assert!((out.velocity_kmh - 110.0).abs() < 1e-12);
        assert!((out.distance_km - 110.0 * 2.0 / 60.0).abs() < 1e-12);
        assert!(out.soc < 0.90);
        assert!((0.90 - out.soc - out.energy_kwh / 85.0).abs() < 1e-12);
    }

    #[test]
    fn step_respects_dt_parameter() {
        let physics = PhysicsModel::default();
        let short = physics.step(0.5, 0.7, 1.0);
        let long = physics.step(0.5, 0.7, 4.0);
        assert!((long.distance_km - 4.0 * short.distance_km).abs() < 1e-9);
        assert!((long.energy_kwh - 4.0 * short.energy_kwh).abs() < 1e-9);
    }

    #[test]
    fn soc_floors_at_zero() {
        let physics = PhysicsModel::default();
        let out = physics.step(0.001, 1.0, 2.0);
        assert_eq!(out.soc, 0.0);
    }

    #[test]
    fn capped_step_consumes_only_for_the_capped_distance() {
        let physics = PhysicsModel::default();
        let free = physics.step(0.5, 1.0, 2.0);
        let capped = physics.step_capped(0.5, 1.0, 2.0, 1.0);
        assert_eq!(capped.distance_km, 1.0);
        assert!(capped.energy_kwh < free.energy_kwh);
        assert!(capped.soc > free.soc);
    }

    #[test]
    fn sport_depletes_faster_than_survival() {
        let physics = PhysicsModel::default();
        let deplete = |aggression: f64| {
            let mut soc = 1.0;
            let mut ticks = 0u32;
            while soc > 0.0 {
                soc = physics.step(soc, aggression, 2.0).soc;
                ticks += 1;
            }
            ticks
        };
        assert!(deplete(1.0) < deplete(0.4));
    }

    #[test]
    fn charge_energy_matches_soc_gap() {
        let physics = PhysicsModel::default();
        assert!((physics.energy_to_charge_kwh(0.20, 0.85) - 0.65 * 85.0).abs() < 1e-12);
        assert_eq!(physics.energy_to_charge_kwh(0.90, 0.85), 0.0);
    }
}
