//! Check-then-create provisioning against the backend's management API.
//!
//! Each resource follows the same idempotent pattern: GET by id, create
//! with a POST only on 404, treat any other success as "already there".
//! There is no reconciliation of an existing resource against the desired
//! configuration, and no retries; a transport error or a rejected create
//! aborts the sequence.

use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::config::BackendConfig;
use super::error::{ApiError, ApiResult};

/// What `ensure_resource` did for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

/// One entry of the model catalog the setup binary provisions.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub model_id: &'static str,
    /// GitHub repository the model is imported from.
    pub repository: &'static str,
    pub model_description: &'static str,
    pub instance_id: &'static str,
    pub pipeline_id: &'static str,
    pub pipeline_description: &'static str,
}

impl ModelSpec {
    /// Resource name of the deployed instance, as referenced by pipeline
    /// recipes: `models/{id}/instances/{instance}`.
    pub fn instance_name(&self) -> String {
        format!("models/{}/instances/{}", self.model_id, self.instance_id)
    }
}

pub struct ProvisionClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl ProvisionClient {
    pub fn new(http: reqwest::Client, config: BackendConfig) -> Self {
        Self { http, config }
    }

    /// Ensures a resource exists in `collection`, creating it from
    /// `create_body` when the GET comes back 404.
    pub async fn ensure_resource(
        &self,
        collection: &str,
        id: &str,
        create_body: Value,
    ) -> ApiResult<EnsureOutcome> {
        let resp = self
            .http
            .get(self.config.resource_url(&format!("{collection}/{id}")))
            .send()
            .await?;

        if resp.status() != StatusCode::NOT_FOUND {
            info!(collection, id, "resource already exists");
            return Ok(EnsureOutcome::AlreadyExists);
        }

        let resp = self
            .http
            .post(self.config.collection_url(collection))
            .json(&create_body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(collection, id, %status, "backend rejected resource creation");
            return Err(ApiError::CreateFailed {
                collection: collection.to_string(),
                id: id.to_string(),
                status,
            });
        }
        info!(collection, id, %status, "created resource");
        Ok(EnsureOutcome::Created)
    }

    pub async fn ensure_source_connector(&self, id: &str) -> ApiResult<EnsureOutcome> {
        self.ensure_resource(
            "source-connectors",
            id,
            json!({
                "id": id,
                "source_connector_definition": format!("source-connector-definitions/{id}"),
                "connector": { "configuration": {} },
            }),
        )
        .await
    }

    pub async fn ensure_destination_connector(&self, id: &str) -> ApiResult<EnsureOutcome> {
        self.ensure_resource(
            "destination-connectors",
            id,
            json!({
                "id": id,
                "destination_connector_definition": format!("destination-connector-definitions/{id}"),
                "connector": { "configuration": {} },
            }),
        )
        .await
    }

    /// Ensures a GitHub-imported model exists.
    pub async fn ensure_model(
        &self,
        id: &str,
        repository: &str,
        description: &str,
    ) -> ApiResult<EnsureOutcome> {
        self.ensure_resource(
            "models",
            id,
            json!({
                "id": id,
                "model_definition": "model-definitions/github",
                "description": description,
                "configuration": { "repository": repository },
            }),
        )
        .await
    }

    /// Deploys a model instance so it becomes invocable. Always POSTs;
    /// deploying an already-deployed instance is a backend no-op.
    pub async fn deploy_model_instance(&self, model_id: &str, instance_id: &str) -> ApiResult<()> {
        let name = format!("models/{model_id}/instances/{instance_id}/deploy");
        let resp = self
            .http
            .post(self.config.resource_url(&name))
            .send()
            .await?;
        info!(model_id, instance_id, status = %resp.status(), "deployed model instance");
        Ok(())
    }

    /// Ensures a sync pipeline wiring `source` → model instance →
    /// `destination` exists. Connectors and the deployed instance must
    /// already exist; ordering is enforced only by the caller's call
    /// sequence.
    pub async fn ensure_pipeline(
        &self,
        id: &str,
        description: &str,
        source_connector: &str,
        model_instance_name: &str,
        destination_connector: &str,
    ) -> ApiResult<EnsureOutcome> {
        self.ensure_resource(
            "pipelines",
            id,
            json!({
                "id": id,
                "description": description,
                "recipe": {
                    "source": format!("source-connectors/{source_connector}"),
                    "model_instances": [model_instance_name],
                    "destination": format!("destination-connectors/{destination_connector}"),
                },
            }),
        )
        .await
    }
}
