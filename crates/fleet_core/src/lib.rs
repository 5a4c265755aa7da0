pub mod charging;
pub mod clock;
pub mod distributions;
pub mod ecs;
pub mod fuzzy;
pub mod physics;
pub mod runner;
pub mod scenario;
pub mod spawner;
pub mod systems;
pub mod telemetry;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
