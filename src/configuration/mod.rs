pub mod factories;
pub mod telemetry;
