pub mod config;
pub mod logging;
pub mod telemetry;

pub use config::{Environment, env_opt, env_or, env_parse};
pub use logging::setup_logging;
pub use telemetry::TelemetryGuard;
