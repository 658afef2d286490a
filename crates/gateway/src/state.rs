use crate::annotate::Annotator;
use crate::config::DetectSettings;
use crate::logging::SERVICE_NAME;
use crate::metrics::DetectMetrics;
use inference::Detector;
use std::sync::Arc;

/// Immutable service context built once at startup and shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
    pub annotator: Arc<Annotator>,
    pub settings: Arc<DetectSettings>,
    pub metrics: DetectMetrics,
}

impl AppState {
    pub fn new(detector: Detector, annotator: Annotator, settings: DetectSettings) -> Self {
        Self {
            detector: Arc::new(detector),
            annotator: Arc::new(annotator),
            settings: Arc::new(settings),
            metrics: DetectMetrics::new(SERVICE_NAME),
        }
    }
}
