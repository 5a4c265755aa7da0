mod build;
mod params;

pub use build::build_scenario;
pub use params::{
    ArrivalMode, ChargingPolicy, ScenarioError, ScenarioParams, SimulationEndTimeMs, TickMinutes,
};
