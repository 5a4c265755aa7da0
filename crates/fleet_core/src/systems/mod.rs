pub mod charge_complete;
pub mod spawner;
pub mod vehicle_tick;
