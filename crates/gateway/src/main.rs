use detect_gateway::{
    Annotator, AppState, config::GatewayConfig, logging::setup_logging, server::run_server,
};
use inference::{Detector, backend::ort::OrtBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env()?;
    let _telemetry = setup_logging(&config)?;

    tracing::info!(
        config = ?config,
        "Loaded configuration"
    );

    tracing::info!(
        provider = %config.inference.provider,
        "Loading detection model"
    );
    let backend = OrtBackend::load(&config.inference)?;
    let detector = Detector::new(backend);

    let annotator = Annotator::load(config.font_path.as_deref());

    let state = AppState::new(detector, annotator, config.detect.clone());
    run_server(&config, state).await
}
