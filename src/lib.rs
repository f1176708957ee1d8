pub mod api;
pub mod fetch;
pub mod models;
pub mod render;
pub mod table;

pub use api::{
    ApiError, BackendConfig, EndpointKind, EnsureOutcome, InferenceClient, ModelSpec,
    ProvisionClient,
};
pub use models::{BoundingBox, Detection, InferenceResult};
pub use render::{category_color, draw_detections};
pub use table::DetectionTable;
