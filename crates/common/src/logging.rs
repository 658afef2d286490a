use crate::config::Environment;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize tracing subscriber with pretty formatting for development
/// and JSON formatting for production.
///
/// Uses RUST_LOG environment variable for filtering (defaults to "info" if not set).
///
/// The OpenTelemetry layer installed here has no exporter behind it; use
/// [`crate::TelemetryGuard::init`] instead when an OTLP collector is available.
pub fn setup_logging(environment: &Environment) {
    install(environment, tracing_opentelemetry::layer());
}

pub(crate) fn install<L>(environment: &Environment, otel_layer: L)
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let registry = tracing_subscriber::registry()
        .with(otel_layer)
        .with(env_filter);

    match environment {
        Environment::Production => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_level(true))
                .init();
        }
        Environment::Development => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_ansi(true))
                .init();
        }
    }
}
