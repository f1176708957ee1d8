//! Clients for the two inference endpoints: a model instance's direct
//! `:test` verb and a pipeline's `:trigger` verb. Both take one image URL
//! and normalize the response into an [`InferenceResult`].

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::BackendConfig;
use super::error::ApiResult;
use super::response::{EndpointKind, parse_detections};
use crate::models::InferenceResult;

#[derive(Debug, Serialize)]
struct TriggerRequest<'a> {
    inputs: Vec<ImageInput<'a>>,
}

#[derive(Debug, Serialize)]
struct ImageInput<'a> {
    image_url: &'a str,
}

pub struct InferenceClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl InferenceClient {
    /// Builds a client with an explicit request timeout so a hung backend
    /// cannot stall an interaction forever.
    pub fn new(config: BackendConfig, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn with_client(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    /// Tests a deployed model instance with a remote image URL.
    /// `model_instance_name` is `models/{id}/instances/{instance}`.
    pub async fn test_model_instance(
        &self,
        model_instance_name: &str,
        image_url: &str,
    ) -> ApiResult<InferenceResult> {
        self.call(EndpointKind::ModelTest, model_instance_name, "test", image_url)
            .await
    }

    /// Triggers a pipeline once with a remote image URL.
    /// `pipeline_name` is `pipelines/{id}`.
    pub async fn trigger_pipeline(
        &self,
        pipeline_name: &str,
        image_url: &str,
    ) -> ApiResult<InferenceResult> {
        self.call(EndpointKind::PipelineTrigger, pipeline_name, "trigger", image_url)
            .await
    }

    /// Checks whether a pipeline resource exists (GET returns 200).
    pub async fn pipeline_exists(&self, pipeline_name: &str) -> ApiResult<bool> {
        let resp = self
            .http
            .get(self.config.resource_url(pipeline_name))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    async fn call(
        &self,
        kind: EndpointKind,
        resource_name: &str,
        verb: &str,
        image_url: &str,
    ) -> ApiResult<InferenceResult> {
        let url = self.config.verb_url(resource_name, verb);
        let body = TriggerRequest {
            inputs: vec![ImageInput { image_url }],
        };
        debug!(%url, image_url, "sending inference request");

        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            // Any non-200 is the failure sentinel; the body is dropped.
            warn!(%url, %status, "inference request failed");
            return Ok(InferenceResult::failed());
        }

        let raw: Value = resp.json().await?;
        let detections = parse_detections(kind, &raw)?;
        debug!(%url, count = detections.len(), "parsed detections");
        Ok(InferenceResult::ok(raw, detections))
    }
}
