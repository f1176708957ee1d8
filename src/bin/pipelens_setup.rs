//! One-shot provisioning of the backend: connectors, models, pipelines.
//!
//! Safe to re-run; every resource is created with check-then-create
//! semantics, so a second run creates nothing. Errors are fatal and abort
//! the remaining sequence — re-running picks up where it left off.

use std::time::Duration;

use clap::Parser;

use pipelens::api::{BackendConfig, EnsureOutcome, ModelSpec, ProvisionClient};

const SOURCE_CONNECTOR: &str = "source-http";
const DESTINATION_CONNECTOR: &str = "destination-http";

/// Object-detection models the comparison client targets by default.
const MODEL_CATALOG: &[ModelSpec] = &[
    ModelSpec {
        model_id: "yolov4",
        repository: "instill-ai/model-yolov4-dvc",
        model_description: "YOLOv4 model imported from GitHub",
        instance_id: "v1.0-gpu",
        pipeline_id: "yolov4",
        pipeline_description: "A single model sync pipeline for Object Detection demo with YOLOv4 model",
    },
    ModelSpec {
        model_id: "yolov7",
        repository: "instill-ai/model-yolov7-dvc",
        model_description: "YOLOv7 model imported from GitHub",
        instance_id: "v1.0-gpu",
        pipeline_id: "yolov7",
        pipeline_description: "A single model sync pipeline for Object Detection demo with YOLOv7 model",
    },
];

#[derive(Parser)]
#[command(name = "pipelens-setup")]
#[command(about = "Provision connectors, models, and pipelines on the backend")]
struct Cli {
    /// API base URL
    #[arg(long, default_value = "http://localhost:8080")]
    api_base_url: String,

    /// API version prefix
    #[arg(long, default_value = "v1alpha")]
    api_version: String,

    /// Seconds to wait after model creation and deployment, giving the
    /// backend time to settle before dependent resources reference them
    #[arg(long, default_value_t = 5)]
    settle_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let settle = Duration::from_secs(args.settle_secs);
    let client = ProvisionClient::new(
        reqwest::Client::new(),
        BackendConfig::new(&args.api_base_url, &args.api_version),
    );

    report(
        "source connector",
        SOURCE_CONNECTOR,
        client.ensure_source_connector(SOURCE_CONNECTOR).await?,
    );
    report(
        "destination connector",
        DESTINATION_CONNECTOR,
        client
            .ensure_destination_connector(DESTINATION_CONNECTOR)
            .await?,
    );

    // Connectors must exist before any pipeline referencing them, and a
    // model must be deployed before its pipeline; ordering below is the
    // only thing enforcing that.
    for entry in MODEL_CATALOG {
        report(
            "model",
            entry.model_id,
            client
                .ensure_model(entry.model_id, entry.repository, entry.model_description)
                .await?,
        );
        tokio::time::sleep(settle).await;

        client
            .deploy_model_instance(entry.model_id, entry.instance_id)
            .await?;
        tokio::time::sleep(settle).await;

        report(
            "pipeline",
            entry.pipeline_id,
            client
                .ensure_pipeline(
                    entry.pipeline_id,
                    entry.pipeline_description,
                    SOURCE_CONNECTOR,
                    &entry.instance_name(),
                    DESTINATION_CONNECTOR,
                )
                .await?,
        );
    }

    println!("Provisioning complete.");
    Ok(())
}

fn report(kind: &str, id: &str, outcome: EnsureOutcome) {
    match outcome {
        EnsureOutcome::Created => println!("Created {kind}: {id}"),
        EnsureOutcome::AlreadyExists => println!("{kind} already exists: {id}"),
    }
}
