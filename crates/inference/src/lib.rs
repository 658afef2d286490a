pub mod backend;
pub mod config;
pub mod detection;
pub mod errors;
pub mod labels;
pub mod processing;
pub mod service;

// Re-export commonly used types for convenience
pub use backend::{InferenceBackend, InferenceOutput};
pub use config::{ExecutionProvider, InferenceConfig};
pub use detection::DetectionRecord;
pub use errors::InferenceError;
pub use labels::CLASS_NAMES;
pub use service::Detector;
