mod config;
mod error;
mod inference;
mod provision;
mod response;

pub use config::BackendConfig;
pub use error::{ApiError, ApiResult};
pub use inference::InferenceClient;
pub use provision::{EnsureOutcome, ModelSpec, ProvisionClient};
pub use response::{EndpointKind, parse_detections};
