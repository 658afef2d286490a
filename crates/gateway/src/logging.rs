use crate::config::GatewayConfig;
use common::TelemetryGuard;

pub const SERVICE_NAME: &str = "detect-gateway";

/// Install the tracing subscriber, exporting over OTLP when an endpoint is configured.
///
/// The returned guard must be held for the lifetime of the process.
pub fn setup_logging(config: &GatewayConfig) -> anyhow::Result<Option<TelemetryGuard>> {
    match config.otel_endpoint.as_deref() {
        Some(endpoint) => Ok(Some(TelemetryGuard::init(
            SERVICE_NAME,
            endpoint,
            &config.environment,
        )?)),
        None => {
            common::setup_logging(&config.environment);
            Ok(None)
        }
    }
}
