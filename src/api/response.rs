//! Wire types for the detection responses returned by the backend.
//!
//! The two endpoint kinds return closely related but distinct shapes:
//! a model `:test` call nests a single `output` object, while a pipeline
//! `:trigger` call nests a *list* of outputs and the detections live at
//! index 0. Both paths are modeled explicitly so a missing case is a
//! compile error, not a runtime surprise.

use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{BoundingBox, Detection};

/// Which remote endpoint produced a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// `POST …/models/{id}/instances/{instance}:test`
    ModelTest,
    /// `POST …/pipelines/{id}:trigger`
    PipelineTrigger,
}

impl EndpointKind {
    /// Classifies a resource name by its prefix. Returns `None` for
    /// names that are neither a pipeline nor a deployed model instance;
    /// both forms require non-empty id segments.
    pub fn from_resource_name(name: &str) -> Option<Self> {
        if name.strip_prefix("pipelines/").is_some_and(|id| !id.is_empty()) {
            return Some(Self::PipelineTrigger);
        }
        match name
            .strip_prefix("models/")
            .and_then(|rest| rest.split_once("/instances/"))
        {
            Some((model, instance)) if !model.is_empty() && !instance.is_empty() => {
                Some(Self::ModelTest)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelTestBody {
    output: TaskOutput,
}

#[derive(Debug, Deserialize)]
struct PipelineTriggerBody {
    output: Vec<TaskOutput>,
}

#[derive(Debug, Deserialize)]
struct TaskOutput {
    detection_outputs: Vec<DetectionOutput>,
}

#[derive(Debug, Deserialize)]
struct DetectionOutput {
    bounding_box_objects: Vec<BoundingBoxObject>,
}

#[derive(Debug, Deserialize)]
struct BoundingBoxObject {
    category: String,
    score: f32,
    bounding_box: WireBox,
}

#[derive(Debug, Deserialize)]
struct WireBox {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl From<BoundingBoxObject> for Detection {
    fn from(obj: BoundingBoxObject) -> Self {
        // Coordinates are copied verbatim; no scaling or rounding here.
        Detection::new(
            BoundingBox::new(
                obj.bounding_box.left,
                obj.bounding_box.top,
                obj.bounding_box.width,
                obj.bounding_box.height,
            ),
            obj.category,
            obj.score,
        )
    }
}

/// Parses a 200-response body into detections, dispatching on the
/// endpoint kind. Missing or misshapen fields at any nesting level,
/// including an empty outer output list, yield a typed
/// [`ApiError::MalformedResponse`].
pub fn parse_detections(kind: EndpointKind, body: &Value) -> Result<Vec<Detection>, ApiError> {
    match kind {
        EndpointKind::ModelTest => {
            let parsed: ModelTestBody = serde_json::from_value(body.clone())
                .map_err(|e| ApiError::malformed("model test", e.to_string()))?;
            first_detection_output(parsed.output, "model test")
        }
        EndpointKind::PipelineTrigger => {
            let parsed: PipelineTriggerBody = serde_json::from_value(body.clone())
                .map_err(|e| ApiError::malformed("pipeline trigger", e.to_string()))?;
            let output = parsed
                .output
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::malformed("pipeline trigger", "empty output list"))?;
            first_detection_output(output, "pipeline trigger")
        }
    }
}

fn first_detection_output(
    output: TaskOutput,
    endpoint: &'static str,
) -> Result<Vec<Detection>, ApiError> {
    let detections = output
        .detection_outputs
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::malformed(endpoint, "no detection outputs"))?;
    Ok(detections
        .bounding_box_objects
        .into_iter()
        .map(Detection::from)
        .collect())
}
