pub mod annotate;
pub mod codec;
pub mod config;
pub mod errors;
pub mod font;
pub mod logging;
pub mod metrics;
pub mod payload;
pub mod pipeline;
pub mod routes;
pub mod server;
pub mod state;

pub use annotate::Annotator;
pub use errors::ApiError;
pub use routes::router;
pub use state::AppState;
